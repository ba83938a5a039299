//! Alias-driven field extraction from loosely shaped JSON.
//!
//! The platform's payload shapes differ between API versions and endpoints,
//! so each logical field is described by an ordered list of dotted paths.
//! The first path that yields a usable value wins.

use serde_json::Value;

/// Follows a dotted path. Numeric segments index into arrays.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// Renders a scalar as text. Blank strings, null and containers yield `None`.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Reads a number, accepting numeric strings with thousands separators.
pub fn scalar_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replace(',', "").parse().ok(),
        _ => None,
    }
}

/// First alias that renders as text.
pub fn first_text(value: &Value, aliases: &[&str]) -> Option<String> {
    aliases
        .iter()
        .find_map(|path| lookup(value, path).and_then(scalar_text))
}

/// First alias that reads as a number.
pub fn first_number(value: &Value, aliases: &[&str]) -> Option<f64> {
    aliases
        .iter()
        .find_map(|path| lookup(value, path).and_then(scalar_number))
}

/// First alias that is an array.
pub fn first_array<'a>(value: &'a Value, aliases: &[&str]) -> Option<&'a Vec<Value>> {
    aliases
        .iter()
        .find_map(|path| lookup(value, path).and_then(Value::as_array))
}

/// First alias that is an object.
pub fn first_object<'a>(value: &'a Value, aliases: &[&str]) -> Option<&'a Value> {
    aliases
        .iter()
        .find_map(|path| lookup(value, path).filter(|v| v.is_object()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_lookup_nested_and_indexed() {
        let value = json!({"a": {"b": [{"c": 1}, {"c": 2}]}});
        assert_eq!(lookup(&value, "a.b.1.c"), Some(&json!(2)));
        assert_eq!(lookup(&value, "a.x"), None);
        assert_eq!(lookup(&value, "a.b.c"), None);
    }

    #[test]
    fn test_first_text_skips_blank_and_null() {
        let value = json!({"a": null, "b": "  ", "c": 42});
        assert_eq!(first_text(&value, &["a", "b", "c"]), Some("42".to_string()));
        assert_eq!(first_text(&value, &["a", "b"]), None);
    }

    #[test]
    fn test_first_number_accepts_strings() {
        let value = json!({"amount": "12,500"});
        assert_eq!(first_number(&value, &["missing", "amount"]), Some(12500.0));
    }

    #[test]
    fn test_first_text_ignores_containers() {
        let value = json!({"a": {"nested": true}, "b": "x"});
        assert_eq!(first_text(&value, &["a", "b"]), Some("x".to_string()));
    }
}
