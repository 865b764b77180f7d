use crate::error::{ExcelError, ExcelResult};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::Path;

//==============================================================================
// Cell Values
//==============================================================================

/// A single typed cell
///
/// Serializes to JSON as the bare value, with `Empty` rendered as `""`
/// so read results look the same whether a cell was blank or missing.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Integer(i64),
    Float(f64),
    Text(String),
    Boolean(bool),
}

impl From<serde_json::Value> for CellValue {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => CellValue::Empty,
            Value::Bool(b) => CellValue::Boolean(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => CellValue::Integer(i),
                // u64 above i64::MAX and all non-integral numbers
                None => n.as_f64().map(CellValue::Float).unwrap_or(CellValue::Empty),
            },
            Value::String(s) => CellValue::Text(s),
            // Nested structures have no cell form; keep their JSON text
            other @ (Value::Array(_) | Value::Object(_)) => CellValue::Text(other.to_string()),
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Empty => serializer.serialize_str(""),
            CellValue::Integer(i) => serializer.serialize_i64(*i),
            CellValue::Float(f) => serializer.serialize_f64(*f),
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Boolean(b) => serializer.serialize_bool(*b),
        }
    }
}

impl<'de> Deserialize<'de> for CellValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(CellValue::from)
    }
}

//==============================================================================
// Records
//==============================================================================

/// One row: column name → value, in the order the columns were first seen
pub type Record = IndexMap<String, CellValue>;

/// Rows in file order
pub type RecordSet = Vec<Record>;

/// Parse the `data` payload of a write request: a JSON array of flat objects
pub fn parse_records(json: &str) -> ExcelResult<RecordSet> {
    serde_json::from_str(json).map_err(|e| ExcelError::Parse(format!("Invalid JSON data: {}", e)))
}

/// Ordered, deduplicated union of every record's keys
pub fn header_for(records: &[Record]) -> Vec<String> {
    let mut seen: IndexSet<&str> = IndexSet::new();
    for record in records {
        for key in record.keys() {
            seen.insert(key.as_str());
        }
    }
    seen.into_iter().map(str::to_string).collect()
}

//==============================================================================
// File Formats
//==============================================================================

/// On-disk format, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// .xlsx, .xlsm, .xltx, .xltm
    Spreadsheet,
    /// .csv
    Csv,
}

impl FileFormat {
    /// Resolve the format from a path's extension (case-insensitive)
    ///
    /// Never touches the filesystem.
    pub fn from_path(path: &Path) -> ExcelResult<Self> {
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            "xlsx" | "xlsm" | "xltx" | "xltm" => Ok(FileFormat::Spreadsheet),
            "csv" => Ok(FileFormat::Csv),
            _ => Err(ExcelError::UnsupportedFormat {
                extension: if ext.is_empty() {
                    String::new()
                } else {
                    format!(".{}", ext)
                },
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(pairs: &[(&str, CellValue)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            FileFormat::from_path(Path::new("a.xlsx")).unwrap(),
            FileFormat::Spreadsheet
        );
        assert_eq!(
            FileFormat::from_path(Path::new("a.XLTM")).unwrap(),
            FileFormat::Spreadsheet
        );
        assert_eq!(
            FileFormat::from_path(Path::new("dir.v2/data.Csv")).unwrap(),
            FileFormat::Csv
        );
    }

    #[test]
    fn test_format_rejects_unknown_and_missing_extension() {
        let err = FileFormat::from_path(Path::new("report.xls")).unwrap_err();
        assert!(err.to_string().contains(".xls"));
        assert!(matches!(
            FileFormat::from_path(Path::new("noext")),
            Err(ExcelError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn test_header_first_seen_order() {
        let records = vec![
            record(&[("a", CellValue::Integer(1)), ("b", CellValue::Integer(2))]),
            record(&[("b", CellValue::Integer(3)), ("c", CellValue::Integer(4))]),
        ];
        assert_eq!(header_for(&records), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_parse_records_keeps_key_order() {
        let records = parse_records(r#"[{"z": 1, "a": "x"}, {"m": null}]"#).unwrap();
        assert_eq!(records.len(), 2);
        let keys: Vec<&str> = records[0].keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(records[1]["m"], CellValue::Empty);
    }

    #[test]
    fn test_parse_records_rejects_non_array() {
        assert!(matches!(
            parse_records(r#"{"a": 1}"#),
            Err(ExcelError::Parse(_))
        ));
        assert!(matches!(parse_records("[{"), Err(ExcelError::Parse(_))));
    }

    #[test]
    fn test_cell_value_from_json() {
        assert_eq!(CellValue::from(json!(25)), CellValue::Integer(25));
        assert_eq!(CellValue::from(json!(2.5)), CellValue::Float(2.5));
        assert_eq!(CellValue::from(json!(true)), CellValue::Boolean(true));
        assert_eq!(CellValue::from(json!(null)), CellValue::Empty);
        assert_eq!(
            CellValue::from(json!(u64::MAX)),
            CellValue::Float(u64::MAX as f64)
        );
        assert_eq!(
            CellValue::from(json!([1, 2])),
            CellValue::Text("[1,2]".to_string())
        );
    }

    #[test]
    fn test_cell_value_serialization() {
        let row = record(&[
            ("empty", CellValue::Empty),
            ("int", CellValue::Integer(7)),
            ("float", CellValue::Float(1000.0)),
            ("text", CellValue::Text("abc".to_string())),
            ("flag", CellValue::Boolean(false)),
        ]);
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(
            json,
            r#"{"empty":"","int":7,"float":1000.0,"text":"abc","flag":false}"#
        );
    }
}
