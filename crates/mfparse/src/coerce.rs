//! Coercion of arbitrary values to pattern strings.
//!
//! Callers that receive patterns from untyped sources (JSON message catalogs,
//! scripting bridges) can hand the raw value to [`crate::parse_value`]. The
//! value is converted the way a JavaScript `String(value)` call would, so
//! patterns that were numbers or `null` in the source still parse.

use serde_json::{Number, Value};

/// Text produced for an absent value.
pub const UNDEFINED: &str = "undefined";

/// Converts a value to the string a pattern parser should see.
///
/// `None` is an absent value and becomes `"undefined"`.
pub fn coerce_value(value: Option<&Value>) -> String {
    match value {
        None => UNDEFINED.to_string(),
        Some(value) => coerce(value),
    }
}

fn coerce(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number_text(number),
        Value::String(text) => text.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                _ => coerce(item),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Shortest decimal text for a number, using exponent notation outside
/// `1e-6..1e21` as JavaScript does.
fn number_text(number: &Number) -> String {
    if let Some(int) = number.as_i64() {
        return int.to_string();
    }
    if let Some(int) = number.as_u64() {
        return int.to_string();
    }
    let Some(float) = number.as_f64() else {
        return number.to_string();
    };
    if float == 0.0 {
        return "0".to_string();
    }
    let magnitude = float.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return float.to_string();
    }
    let exponential = format!("{float:e}");
    match exponential.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exponential,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_absent_and_null() {
        assert_eq!(coerce_value(None), "undefined");
        assert_eq!(coerce_value(Some(&Value::Null)), "null");
    }

    #[test]
    fn test_numbers_use_canonical_text() {
        assert_eq!(coerce_value(Some(&json!(12.34))), "12.34");
        assert_eq!(coerce_value(Some(&json!(7))), "7");
        assert_eq!(coerce_value(Some(&json!(1.0))), "1");
        assert_eq!(coerce_value(Some(&json!(-0.0))), "0");
    }

    #[test]
    fn test_large_and_small_numbers_use_exponents() {
        assert_eq!(coerce_value(Some(&json!(1e21))), "1e+21");
        assert_eq!(coerce_value(Some(&json!(1.5e-8))), "1.5e-8");
    }

    #[test]
    fn test_arrays_join_with_commas() {
        assert_eq!(coerce_value(Some(&json!([1, null, "a", [true]]))), "1,,a,true");
    }

    #[test]
    fn test_objects_and_booleans() {
        assert_eq!(coerce_value(Some(&json!({ "a": 1 }))), "[object Object]");
        assert_eq!(coerce_value(Some(&json!(false))), "false");
    }
}
