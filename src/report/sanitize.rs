use chrono::SecondsFormat;
use orcas_types::Value;

/// Shown wherever a value is missing or cannot be printed.
pub const PLACEHOLDER: &str = "–";

/// Removes every control character (`Cc`), including tab and newline.
pub fn sanitize(text: &str) -> String {
    text.chars().filter(|c| !c.is_control()).collect()
}

/// Converts a cell or metadata value into its display string.
pub fn print_value(value: &Value) -> String {
    match value {
        Value::Null => PLACEHOLDER.to_string(),
        Value::Number(n) => print_number(*n),
        Value::Bool(true) => "Yes".to_string(),
        Value::Bool(false) => "No".to_string(),
        Value::Text(text) => sanitize(text),
        Value::Timestamp(ts) => ts.to_rfc3339_opts(SecondsFormat::Millis, true),
        Value::List(items) => items.iter().map(print_value).collect::<Vec<_>>().join(", "),
        Value::Record(_) => match serde_json::to_string(value) {
            Ok(json) => sanitize(&json),
            Err(e) => {
                log::debug!("Record value could not be serialized: {e}");
                PLACEHOLDER.to_string()
            }
        },
    }
}

fn print_number(n: f64) -> String {
    if !n.is_finite() {
        return PLACEHOLDER.to_string();
    }
    // Integral values print without a trailing ".0".
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}
