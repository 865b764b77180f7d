use clap::{Parser, Subcommand};
use excel_mcp::cli;
use excel_mcp::error::ExcelResult;
use excel_mcp::logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "excel")]
#[command(about = "Read and write Excel / CSV files as JSON records.")]
#[command(long_about = "excel - Excel and CSV files as JSON records

FORMATS:
  .xlsx .xlsm .xltx .xltm  Spreadsheet (sheet selectable)
  .csv                     Comma-separated values

COMMANDS:
  read   - File to a JSON array of row objects (first row is the header)
  write  - JSON array of row objects to a new file

EXAMPLES:
  excel read data.xlsx --sheet Sales
  excel write out.csv --data '[{\"name\":\"Ann\",\"age\":25}]'
  cat rows.json | excel write out.xlsx

The same operations are available to AI agents via the excel-mcp server.")]
#[command(version)]
struct Cli {
    /// Log filter directive (logs go to stderr)
    #[arg(long, global = true, env = "EXCEL_MCP_LOG", value_parser = logging::parse_directive)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read a spreadsheet or CSV file and print its rows as JSON
    Read {
        /// File to read (.xlsx, .xlsm, .xltx, .xltm or .csv)
        file: PathBuf,

        /// Sheet to read (defaults to the first sheet; ignored for CSV)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Write the JSON to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write a JSON array of objects to a spreadsheet or CSV file
    Write {
        /// File to create (.xlsx, .xlsm, .xltx, .xltm or .csv)
        file: PathBuf,

        /// JSON data, e.g. '[{"name":"Ann","age":25}]'
        #[arg(short, long, conflicts_with = "input")]
        data: Option<String>,

        /// Read the JSON data from this file (stdin when neither is given)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Sheet name (defaults to Sheet1; ignored for CSV)
        #[arg(short, long)]
        sheet: Option<String>,
    },
}

fn main() -> ExcelResult<()> {
    let cli = Cli::parse();
    logging::init(cli.log_level.as_deref());

    match cli.command {
        Commands::Read {
            file,
            sheet,
            output,
        } => cli::read(file, sheet, output),

        Commands::Write {
            file,
            data,
            input,
            sheet,
        } => cli::write(file, data, input, sheet),
    }
}
