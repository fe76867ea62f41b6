use serde_json::Value;

/// Both values finite and within geographic range.
pub fn is_valid_coordinate(lat: f64, lon: f64) -> bool {
    if !lat.is_finite() || !lon.is_finite() {
        return false;
    }
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lon)
}

/// Coerce a JSON value to f64: numbers pass through, strings are parsed.
/// Anything else (null, bool, arrays) is rejected outright instead of
/// degrading to NaN.
pub fn coerce_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|f| f.is_finite()),
        _ => None,
    }
}

/// Non-blank string content with surrounding whitespace stripped.
pub fn trimmed_text(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) => {
            let t = s.trim();
            (!t.is_empty()).then_some(t)
        }
        _ => None,
    }
}
