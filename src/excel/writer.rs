//! Writer implementation - records → .xlsx / .csv

use super::value::{format_value, is_whole_number};
use crate::error::{ExcelError, ExcelResult};
use crate::types::{header_for, CellValue, FileFormat, Record};
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Sheet name used when the caller does not supply one
pub const DEFAULT_SHEET_NAME: &str = "Sheet1";

/// Built-in number format "0": plain integer, no exponent, no decimal point
const INTEGER_NUM_FORMAT: u8 = 1;

/// Excel's column limit (XFD)
const MAX_COLUMNS: usize = 16_384;

/// Writes records to a new file, one column per distinct key
pub struct ExcelWriter {
    path: PathBuf,
    sheet_name: String,
}

impl ExcelWriter {
    /// Create a writer targeting `path` with the default sheet name
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
        }
    }

    /// Name the worksheet; `None` or an empty name keeps `Sheet1`
    ///
    /// Ignored for CSV files.
    pub fn with_sheet(mut self, sheet_name: Option<&str>) -> Self {
        if let Some(name) = sheet_name.filter(|s| !s.is_empty()) {
            self.sheet_name = name.to_string();
        }
        self
    }

    /// Write the records, replacing any existing file at the path
    ///
    /// Nothing is created when `records` is empty or the extension is not
    /// supported.
    pub fn write(&self, records: &[Record]) -> ExcelResult<()> {
        if records.is_empty() {
            return Err(ExcelError::EmptyInput("no data to write".to_string()));
        }

        let format = FileFormat::from_path(&self.path)?;
        let header = header_for(records);

        match format {
            FileFormat::Spreadsheet => self.write_spreadsheet(&header, records)?,
            FileFormat::Csv => self.write_csv(&header, records)?,
        }

        debug!(
            path = %self.path.display(),
            rows = records.len(),
            columns = header.len(),
            "wrote records"
        );
        Ok(())
    }

    fn write_spreadsheet(&self, header: &[String], records: &[Record]) -> ExcelResult<()> {
        if header.len() > MAX_COLUMNS {
            return Err(ExcelError::InvalidArgument(format!(
                "{} columns exceeds the worksheet limit of {}",
                header.len(),
                MAX_COLUMNS
            )));
        }

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();

        // A fresh workbook's sheet is already "Sheet1"; only rename on mismatch
        if worksheet.name() != self.sheet_name {
            worksheet.set_name(&self.sheet_name).map_err(|e| {
                ExcelError::InvalidArgument(format!(
                    "Invalid sheet name {:?}: {}",
                    self.sheet_name, e
                ))
            })?;
        }

        let integer_format = Format::new().set_num_format_index(INTEGER_NUM_FORMAT);

        // Header row
        for (col, name) in header.iter().enumerate() {
            worksheet
                .write_string(0, col as u16, name)
                .map_err(|e| cell_error(0, col, e))?;
        }

        // Data rows start directly under the header
        for (idx, record) in records.iter().enumerate() {
            let row = u32::try_from(idx + 1).map_err(|e| cell_error(idx + 1, 0, e))?;
            for (col, name) in header.iter().enumerate() {
                if let Some(value) = record.get(name) {
                    write_cell(worksheet, row, col as u16, value, &integer_format)
                        .map_err(|e| cell_error(idx + 1, col, e))?;
                }
            }
        }

        workbook
            .save(&self.path)
            .map_err(|e| ExcelError::io(&self.path, e))
    }

    fn write_csv(&self, header: &[String], records: &[Record]) -> ExcelResult<()> {
        let mut writer =
            csv::Writer::from_path(&self.path).map_err(|e| ExcelError::io(&self.path, e))?;

        writer
            .write_record(header)
            .map_err(|e| ExcelError::io(&self.path, e))?;

        for record in records {
            let row = header.iter().map(|name| {
                record
                    .get(name)
                    .map(format_value)
                    .unwrap_or_default()
            });
            writer
                .write_record(row)
                .map_err(|e| ExcelError::io(&self.path, e))?;
        }

        writer.flush().map_err(|e| ExcelError::io(&self.path, e))
    }
}

/// Write one typed cell; whole numbers get the integer display format
fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    integer_format: &Format,
) -> Result<(), rust_xlsxwriter::XlsxError> {
    match value {
        // Blank cells are simply not written
        CellValue::Empty => {}
        CellValue::Text(s) if s.is_empty() => {}
        CellValue::Integer(i) => {
            worksheet.write_number_with_format(row, col, *i as f64, integer_format)?;
        }
        CellValue::Float(f) if is_whole_number(*f) => {
            worksheet.write_number_with_format(row, col, *f, integer_format)?;
        }
        CellValue::Float(f) => {
            worksheet.write_number(row, col, *f)?;
        }
        CellValue::Text(s) => {
            worksheet.write_string(row, col, s)?;
        }
        CellValue::Boolean(b) => {
            worksheet.write_boolean(row, col, *b)?;
        }
    }
    Ok(())
}

fn cell_error(row: usize, col: usize, cause: impl std::fmt::Display) -> ExcelError {
    ExcelError::InvalidArgument(format!(
        "Failed to write cell at row {}, column {}: {}",
        row + 1,
        col + 1,
        cause
    ))
}
