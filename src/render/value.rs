// src/render/value.rs
//! Display conversions for loosely-typed JSON values coming back from the service

use serde_json::{Number, Value};

/// `null`, `false`, `0`, `-0` and `""` are falsy
pub fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().map_or(false, |f| f == 0.0 || f.is_nan()),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// String conversion as a browser would apply when assigning text.
///
/// Objects have no useful string form there, so they are rendered as compact JSON.
pub fn to_js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => js_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => to_js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Text of a table body cell: falsy or missing cells are blank
pub fn cell_text(cell: Option<&Value>) -> String {
    match cell {
        Some(value) if !is_falsy(value) => to_js_string(value),
        _ => String::new(),
    }
}

/// Text of a header cell: only `null` is blank, `0` stays visible
pub fn header_text(column: &Value) -> String {
    match column {
        Value::Null => String::new(),
        other => to_js_string(other),
    }
}

/// Two-space indented JSON
pub fn pretty_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Number formatting of `Number.prototype.toString`: plain decimals between
/// 1e-6 and 1e21, exponent notation with an explicit sign outside that range
fn js_number(n: &Number) -> String {
    if n.is_i64() || n.is_u64() {
        return n.to_string();
    }

    match n.as_f64() {
        Some(f) if f == 0.0 => "0".to_string(),
        Some(f) if f.abs() >= 1e21 || f.abs() < 1e-6 => js_exponential(f),
        Some(f) if f.fract() == 0.0 => format!("{:.0}", f),
        Some(f) => f.to_string(),
        None => n.to_string(),
    }
}

fn js_exponential(f: f64) -> String {
    let formatted = format!("{:e}", f);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => formatted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_falsy_values() {
        for value in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(is_falsy(&value), "{} should be falsy", value);
        }
        for value in [json!("0"), json!(1), json!([]), json!({}), json!(true)] {
            assert!(!is_falsy(&value), "{} should be truthy", value);
        }
    }

    #[test]
    fn test_cell_text_never_leaks_null() {
        assert_eq!(cell_text(Some(&json!(null))), "");
        assert_eq!(cell_text(Some(&json!(0))), "");
        assert_eq!(cell_text(Some(&json!(""))), "");
        assert_eq!(cell_text(None), "");
        assert_eq!(cell_text(Some(&json!("x"))), "x");
    }

    #[test]
    fn test_header_keeps_zero() {
        assert_eq!(header_text(&json!(0)), "0");
        assert_eq!(header_text(&json!(null)), "");
        assert_eq!(header_text(&json!("Name")), "Name");
    }

    #[test]
    fn test_numbers_render_like_browser() {
        assert_eq!(to_js_string(&json!(75)), "75");
        assert_eq!(to_js_string(&json!(75.0)), "75");
        assert_eq!(to_js_string(&json!(62.5)), "62.5");
        assert_eq!(to_js_string(&json!(-0.0)), "0");
    }

    #[test]
    fn test_extreme_magnitudes_use_exponent() {
        assert_eq!(to_js_string(&json!(1e-7)), "1e-7");
        assert_eq!(to_js_string(&json!(1.5e-10)), "1.5e-10");
        assert_eq!(to_js_string(&json!(0.000001)), "0.000001");
        assert_eq!(to_js_string(&json!(1e21)), "1e+21");
        assert_eq!(to_js_string(&json!(-2.5e22)), "-2.5e+22");
        assert_eq!(to_js_string(&json!(1e20)), "100000000000000000000");
    }

    #[test]
    fn test_arrays_join_with_commas() {
        assert_eq!(to_js_string(&json!(["a", null, 2])), "a,,2");
    }

    #[test]
    fn test_pretty_json_indent() {
        assert_eq!(pretty_json(&json!({"x": 1})), "{\n  \"x\": 1\n}");
        assert_eq!(pretty_json(&json!(["sql"])), "[\n  \"sql\"\n]");
    }
}
