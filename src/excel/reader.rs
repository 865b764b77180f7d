//! Reader implementation - .xlsx / .csv → records

use super::value::parse_value;
use crate::error::{ExcelError, ExcelResult};
use crate::types::{FileFormat, Record, RecordSet};
use calamine::{open_workbook, Data, ExcelDateTime, Range, Reader, Xlsx};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Reads the first row of a sheet as column names and every later row as a record
pub struct ExcelReader {
    path: PathBuf,
    sheet_name: Option<String>,
}

impl ExcelReader {
    /// Create a reader for the first sheet of `path`
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            sheet_name: None,
        }
    }

    /// Read a specific sheet instead of the first one
    ///
    /// An empty name means "first sheet". Ignored for CSV files.
    pub fn with_sheet(mut self, sheet_name: Option<&str>) -> Self {
        self.sheet_name = sheet_name.filter(|s| !s.is_empty()).map(str::to_string);
        self
    }

    /// Read the file into records
    pub fn read(&self) -> ExcelResult<RecordSet> {
        // Resolved before any I/O so unsupported paths are never opened
        let format = FileFormat::from_path(&self.path)?;

        let (rows, source) = match format {
            FileFormat::Spreadsheet => {
                let (sheet, rows) = self.spreadsheet_rows()?;
                (rows, format!("sheet {:?} of {}", sheet, self.path.display()))
            }
            FileFormat::Csv => (self.csv_rows()?, self.path.display().to_string()),
        };

        let records = records_from_rows(rows, &source)?;
        debug!(
            path = %self.path.display(),
            rows = records.len(),
            "read records"
        );
        Ok(records)
    }

    /// Rows of the resolved sheet as text, addressed from A1
    fn spreadsheet_rows(&self) -> ExcelResult<(String, Vec<Vec<String>>)> {
        let mut workbook: Xlsx<_> =
            open_workbook(&self.path).map_err(|e| ExcelError::io(&self.path, e))?;

        let sheet_names = workbook.sheet_names();
        let sheet = match &self.sheet_name {
            Some(name) => {
                if !sheet_names.iter().any(|s| s == name) {
                    return Err(ExcelError::SheetNotFound {
                        sheet: name.clone(),
                        path: self.path.clone(),
                    });
                }
                name.clone()
            }
            None => sheet_names.into_iter().next().ok_or_else(|| {
                ExcelError::EmptyInput(format!("no sheets found in {}", self.path.display()))
            })?,
        };

        let range = workbook
            .worksheet_range(&sheet)
            .map_err(|e| ExcelError::io(&self.path, e))?;

        Ok((sheet, range_rows(&range)))
    }

    fn csv_rows(&self) -> ExcelResult<Vec<Vec<String>>> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false) // The header row is handled like any other row
            .from_path(&self.path)
            .map_err(|e| ExcelError::io(&self.path, e))?;

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| {
                ExcelError::Parse(format!("Failed to read CSV {}: {}", self.path.display(), e))
            })?;
            rows.push(record.iter().map(str::to_string).collect());
        }
        Ok(rows)
    }
}

/// Flatten a used range into text rows starting at worksheet row 1, column A
///
/// calamine ranges begin at the first used cell, so leading blank rows and
/// columns are padded back in. Trailing blanks are trimmed from every row and
/// from the end of the sheet.
fn range_rows(range: &Range<Data>) -> Vec<Vec<String>> {
    let Some((first_row, first_col)) = range.start() else {
        return Vec::new();
    };

    let mut rows: Vec<Vec<String>> = vec![Vec::new(); first_row as usize];
    for row in range.rows() {
        let mut cells = vec![String::new(); first_col as usize];
        cells.extend(row.iter().map(cell_text));
        while cells.last().is_some_and(|c| c.is_empty()) {
            cells.pop();
        }
        rows.push(cells);
    }

    while rows.last().is_some_and(|r| r.is_empty()) {
        rows.pop();
    }
    rows
}

/// Text of a cell as a spreadsheet viewer would show it unformatted
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        // Shortest round-trip form: 25.0 → "25", 3.14 → "3.14"
        Data::Float(f) => f.to_string(),
        Data::Bool(true) => "TRUE".to_string(),
        Data::Bool(false) => "FALSE".to_string(),
        Data::DateTime(dt) => datetime_text(dt),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
        Data::Error(e) => e.to_string(),
    }
}

/// ISO text for a date-formatted cell instead of its serial number
///
/// Midnight renders as a bare date. Durations (`[h]:mm:ss` formats) render as
/// elapsed hours, which may exceed 24.
fn datetime_text(dt: &ExcelDateTime) -> String {
    if dt.is_duration() {
        let total = (dt.as_f64() * 86_400.0).round() as i64;
        let sign = if total < 0 { "-" } else { "" };
        let total = total.abs();
        return format!(
            "{}{}:{:02}:{:02}",
            sign,
            total / 3600,
            total / 60 % 60,
            total % 60
        );
    }

    let (year, month, day, hour, min, sec, _) = dt.to_ymd_hms_milli();
    if (hour, min, sec) == (0, 0, 0) {
        format!("{:04}-{:02}-{:02}", year, month, day)
    } else {
        format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            year, month, day, hour, min, sec
        )
    }
}

/// Build records from text rows: row 0 names the columns
fn records_from_rows(rows: Vec<Vec<String>>, source: &str) -> ExcelResult<RecordSet> {
    let mut rows = rows.into_iter();

    let headers = rows
        .next()
        .ok_or_else(|| ExcelError::EmptyInput(format!("no data found in {}", source)))?;
    if headers.iter().all(String::is_empty) {
        return Err(ExcelError::MissingHeader(source.to_string()));
    }

    let records = rows
        .map(|row| {
            headers
                .iter()
                .enumerate()
                .filter(|(_, name)| !name.is_empty())
                .map(|(idx, name)| {
                    let value = row.get(idx).map(|s| parse_value(s)).unwrap_or_default();
                    (name.clone(), value)
                })
                .collect::<Record>()
        })
        .collect();

    Ok(records)
}
