//! Spreadsheet / CSV conversion
//!
//! - Read: .xlsx family or .csv → records (first row is the header)
//! - Write: records → .xlsx family or .csv (header synthesized from keys)

mod reader;
mod value;
mod writer;

pub use reader::ExcelReader;
pub use value::{format_value, is_whole_number, parse_value};
pub use writer::{ExcelWriter, DEFAULT_SHEET_NAME};

use crate::error::ExcelResult;
use crate::types::{Record, RecordSet};
use std::path::Path;

/// Read `path` into records; `sheet_name` picks a worksheet (first if `None`)
pub fn read_excel<P: AsRef<Path>>(path: P, sheet_name: Option<&str>) -> ExcelResult<RecordSet> {
    ExcelReader::new(path).with_sheet(sheet_name).read()
}

/// Write records to `path`; `sheet_name` defaults to `Sheet1`
pub fn write_excel<P: AsRef<Path>>(
    path: P,
    records: &[Record],
    sheet_name: Option<&str>,
) -> ExcelResult<()> {
    ExcelWriter::new(path).with_sheet(sheet_name).write(records)
}
