//! JSON → flat key map.

use std::collections::HashMap;

use serde_json::Value;

/// Flatten nested JSON object into separator-joined key map.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use html_i18n_injector::dictionary::flatten_json;
///
/// let json = json!({
///     "nav": {
///         "home": "Home",
///         "back": "Back"
///     }
/// });
///
/// let flattened = flatten_json(&json, ".", None);
/// assert_eq!(flattened.get("nav.home"), Some(&"Home".to_string()));
/// assert_eq!(flattened.get("nav.back"), Some(&"Back".to_string()));
/// ```
#[must_use]
pub fn flatten_json(
    json: &Value,
    separator: &str,
    prefix: Option<&str>,
) -> HashMap<String, String> {
    let mut result = HashMap::new();
    flatten_json_value(json, separator, prefix, &mut result);
    result
}

fn flatten_json_value(
    json: &Value,
    separator: &str,
    prefix: Option<&str>,
    result: &mut HashMap<String, String>,
) {
    match json {
        Value::Object(map) => {
            for (key, value) in map {
                let full_key =
                    prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
                flatten_json_value(value, separator, Some(&full_key), result);
            }
        }
        Value::Array(arr) => {
            for (index, value) in arr.iter().enumerate() {
                let full_key =
                    prefix.map_or_else(|| format!("[{index}]"), |p| format!("{p}[{index}]"));
                flatten_json_value(value, separator, Some(&full_key), result);
            }
        }
        Value::String(s) => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), s.clone());
            }
        }
        _ => {
            if let Some(key) = prefix {
                result.insert(key.to_string(), json.to_string());
            }
        }
    }
}

/// Returns the object to flatten, descending into a single language wrapper.
///
/// `{"en_US": {...}}` with `en_US` among `scopes` yields the inner object;
/// anything else is returned unchanged.
pub(super) fn unwrap_scope<'a, S: AsRef<str>>(json: &'a Value, scopes: &[S]) -> &'a Value {
    let Value::Object(map) = json else {
        return json;
    };
    if map.len() != 1 {
        return json;
    }

    map.iter()
        .find(|(key, value)| {
            value.is_object() && scopes.iter().any(|scope| scope.as_ref() == key.as_str())
        })
        .map_or(json, |(_, inner)| inner)
}
