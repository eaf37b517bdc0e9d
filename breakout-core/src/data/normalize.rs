//! Normalize heterogeneous chart responses into canonical [`OhlcvRow`]s.
//!
//! Accepted shapes:
//! - exchange form: `{"chartData": [{"p": close, "h": high, "l": low, "q": volume}, ...]}`
//! - canonical form: `{"data": [{"close", "high", "low", "volume"}, ...]}`
//! - a bare array of either row form
//!
//! Values may be JSON numbers or numeric strings. Any other shape yields an
//! empty array; a `null` chart list is treated as empty.

use serde_json::Value;

use super::provider::OhlcvRow;

/// Normalize a chart response body.
pub fn normalize_chart(body: &Value) -> Vec<OhlcvRow> {
    let rows = match body {
        Value::Array(rows) => rows,
        Value::Object(map) => match map.get("chartData").or_else(|| map.get("data")) {
            Some(Value::Array(rows)) => rows,
            _ => return Vec::new(),
        },
        _ => return Vec::new(),
    };
    rows.iter().filter_map(normalize_row).collect()
}

/// Normalize one row; non-object entries are skipped.
pub fn normalize_row(row: &Value) -> Option<OhlcvRow> {
    let obj = row.as_object()?;
    let field = |long: &str, short: &str| {
        obj.get(long)
            .or_else(|| obj.get(short))
            .and_then(number)
    };
    Some(OhlcvRow {
        close: field("close", "p"),
        high: field("high", "h"),
        low: field("low", "l"),
        volume: field("volume", "q"),
    })
}

fn number(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}
