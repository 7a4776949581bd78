// Pure JSON tree helpers for dot-notation config access (no I/O)

use serde_json::{Map, Value};

/// Look up `a.b.c` in a JSON tree
pub fn get_path<'a>(root: &'a Value, key: &str) -> Option<&'a Value> {
    if key.is_empty() {
        return Some(root);
    }
    key.split('.')
        .try_fold(root, |node, part| node.as_object()?.get(part))
}

/// Insert a value at a nested path, creating objects as needed
/// e.g. insert_nested(map, ["analysis", "timeout_secs"], 600)
/// creates: analysis: { timeout_secs: 600 }
pub fn insert_nested(map: &mut Map<String, Value>, parts: &[&str], value: Value) {
    let Some((first, rest)) = parts.split_first() else {
        return;
    };

    if rest.is_empty() {
        map.insert(first.to_string(), value);
        return;
    }

    let nested = map
        .entry(first.to_string())
        .or_insert_with(|| Value::Object(Map::new()));

    if let Value::Object(nested_map) = nested {
        insert_nested(nested_map, rest, value);
    } else {
        // Key exists but isn't an object - replace with one
        let mut new_map = Map::new();
        insert_nested(&mut new_map, rest, value);
        *nested = Value::Object(new_map);
    }
}

/// Deep-merge `update` into `base`
///
/// Objects merge key by key; any other value replaces what was there.
pub fn merge_values(base: &mut Value, update: Value) {
    match (base, update) {
        (Value::Object(base_map), Value::Object(update_map)) => {
            for (key, val) in update_map {
                match base_map.get_mut(&key) {
                    Some(existing) if existing.is_object() && val.is_object() => {
                        merge_values(existing, val)
                    }
                    _ => {
                        base_map.insert(key, val);
                    }
                }
            }
        }
        (base, update) => *base = update,
    }
}

/// Parse a CLI-supplied value: JSON if it parses, otherwise a plain string
pub fn parse_cli_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn get_path_walks_nested_objects() {
        let v = json!({"fiji": {"urls": {"linux": "https://x"}}});
        assert_eq!(get_path(&v, "fiji.urls.linux"), Some(&json!("https://x")));
        assert_eq!(get_path(&v, "fiji.urls.beos"), None);
        assert_eq!(get_path(&v, "fiji.urls.linux.deeper"), None);
    }

    #[test]
    fn insert_nested_creates_intermediates() {
        let mut m = Map::new();
        insert_nested(&mut m, &["demo", "custom_setting"], json!("test_value"));
        assert_eq!(Value::Object(m), json!({"demo": {"custom_setting": "test_value"}}));
    }

    #[test]
    fn insert_nested_replaces_scalar_parent() {
        let mut m = Map::new();
        m.insert("a".to_string(), json!(1));
        insert_nested(&mut m, &["a", "b"], json!(2));
        assert_eq!(Value::Object(m), json!({"a": {"b": 2}}));
    }

    #[test]
    fn merge_keeps_untouched_siblings() {
        let mut base = json!({"analysis": {"timeout_secs": 300, "probe_timeout_secs": 30}});
        merge_values(&mut base, json!({"analysis": {"timeout_secs": 600}}));
        assert_eq!(
            base,
            json!({"analysis": {"timeout_secs": 600, "probe_timeout_secs": 30}})
        );
    }

    #[test]
    fn merge_replaces_arrays_wholesale() {
        let mut base = json!({"files": ["a", "b"]});
        merge_values(&mut base, json!({"files": ["c"]}));
        assert_eq!(base, json!({"files": ["c"]}));
    }

    #[test]
    fn cli_values_fall_back_to_strings() {
        assert_eq!(parse_cli_value("600"), json!(600));
        assert_eq!(parse_cli_value("false"), json!(false));
        assert_eq!(parse_cli_value("Wavelet filter"), json!("Wavelet filter"));
    }
}
