use crate::error::{ExcelError, ExcelResult};
use crate::excel::{read_excel, write_excel};
use crate::types::parse_records;
use colored::Colorize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

/// Execute the read command
///
/// With no `output`, the JSON array goes to stdout on its own so it can be
/// piped; status lines are only printed when writing to a file.
pub fn read(file: PathBuf, sheet: Option<String>, output: Option<PathBuf>) -> ExcelResult<()> {
    let records = read_excel(&file, sheet.as_deref())?;
    let json = serde_json::to_string_pretty(&records)
        .map_err(|e| ExcelError::Parse(format!("Failed to encode records as JSON: {}", e)))?;

    match output {
        None => println!("{}", json),
        Some(output) => {
            fs::write(&output, json + "\n").map_err(|e| ExcelError::io(&output, e))?;
            println!("{}", "✅ Read Complete!".bold().green());
            println!("   Source: {}", file.display());
            println!("   Rows:   {}", records.len());
            println!("   JSON:   {}", output.display());
        }
    }

    Ok(())
}

/// Execute the write command
///
/// Records come from `data`, else the `input` file, else stdin.
pub fn write(
    file: PathBuf,
    data: Option<String>,
    input: Option<PathBuf>,
    sheet: Option<String>,
) -> ExcelResult<()> {
    let json = match (data, input) {
        (Some(data), _) => data,
        (None, Some(input)) => {
            fs::read_to_string(&input).map_err(|e| ExcelError::io(&input, e))?
        }
        (None, None) => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| ExcelError::io(Path::new("<stdin>"), e))?;
            buf
        }
    };

    let records = parse_records(&json)?;
    write_excel(&file, &records, sheet.as_deref())?;

    println!("{}", "✅ Write Complete!".bold().green());
    println!("   File: {}", file.display());
    println!("   Rows: {}", records.len());

    Ok(())
}
