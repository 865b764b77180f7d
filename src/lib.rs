//! excel-mcp - Excel and CSV files as JSON records
//!
//! This library converts between spreadsheet/CSV files and ordered lists of
//! records (column name → typed value), and serves both directions as MCP
//! tools.
//!
//! # Features
//!
//! - Read .xlsx, .xlsm, .xltx, .xltm and .csv; the first row is the header
//! - Integer / float / text inference on read
//! - Header synthesized from record keys in first-seen order on write
//! - Whole numbers written with an integer display format (no scientific notation)
//! - MCP server (`read_excel`, `write_excel`) over stdio
//!
//! # Example
//!
//! ```no_run
//! use excel_mcp::excel::{read_excel, write_excel};
//! use excel_mcp::types::parse_records;
//!
//! let records = parse_records(r#"[{"name": "Ann", "age": 25}]"#)?;
//! write_excel("people.xlsx", &records, Some("People"))?;
//!
//! let back = read_excel("people.xlsx", Some("People"))?;
//! println!("Rows: {}", back.len());
//! # Ok::<(), excel_mcp::error::ExcelError>(())
//! ```

pub mod cli;
pub mod error;
pub mod excel;
pub mod logging;
pub mod mcp;
pub mod types;

// Re-export commonly used types
pub use error::{ExcelError, ExcelResult};
pub use types::{CellValue, FileFormat, Record, RecordSet};
