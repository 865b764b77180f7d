//! Cell value inference and text rendering shared by the reader and writer

use crate::types::CellValue;

/// Infer a typed value from raw cell text
///
/// Order matters: a strict whole-number parse is tried first, then a float
/// parse, and anything else is kept verbatim. Leading zeros are not
/// significant, so `"007"` becomes `7`.
pub fn parse_value(s: &str) -> CellValue {
    if s.is_empty() {
        return CellValue::Empty;
    }

    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }

    // "inf" and "NaN" parse as f64 but have no JSON form
    match s.parse::<f64>() {
        Ok(f) if f.is_finite() => CellValue::Float(f),
        _ => CellValue::Text(s.to_string()),
    }
}

/// Render a value as CSV text, never in scientific notation
pub fn format_value(value: &CellValue) -> String {
    match value {
        CellValue::Empty => String::new(),
        CellValue::Integer(i) => i.to_string(),
        CellValue::Float(f) if is_whole_number(*f) => format!("{:.0}", f),
        // f64's Display is shortest round-trip and always fixed-point
        CellValue::Float(f) => f.to_string(),
        CellValue::Text(s) => s.clone(),
        CellValue::Boolean(b) => b.to_string(),
    }
}

/// True for finite floats with no fractional part (`2.0`, `1e20`)
pub fn is_whole_number(f: f64) -> bool {
    f.is_finite() && f.fract() == 0.0
}
