//! Null-tolerant lookups into untyped upstream payloads.

use serde_json::Value;

use socialpulse_core::Metric;

/// Follows `path` through nested objects. `null` counts as absent.
pub(crate) fn at<'a>(value: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(value, |current, key| current.get(*key))
        .filter(|v| !v.is_null())
}

/// Returns the first path that resolves to a non-null value.
pub(crate) fn first_at<'a>(value: &'a Value, paths: &[&[&str]]) -> Option<&'a Value> {
    paths.iter().find_map(|path| at(value, path))
}

pub(crate) fn has_any(value: &Value, paths: &[&[&str]]) -> bool {
    first_at(value, paths).is_some()
}

/// First path holding a number or string, as a [`Metric`].
pub(crate) fn metric(value: &Value, paths: &[&[&str]]) -> Option<Metric> {
    paths
        .iter()
        .find_map(|path| at(value, path).and_then(Metric::from_value))
}

/// First path holding a string.
pub(crate) fn string(value: &Value, paths: &[&[&str]]) -> Option<String> {
    paths
        .iter()
        .find_map(|path| at(value, path).and_then(Value::as_str))
        .map(ToOwned::to_owned)
}

pub(crate) fn boolean(value: &Value, path: &[&str]) -> Option<bool> {
    at(value, path).and_then(Value::as_bool)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn at_treats_null_as_missing() {
        let v = json!({"a": {"b": null, "c": 1}});
        assert!(at(&v, &["a", "b"]).is_none());
        assert_eq!(at(&v, &["a", "c"]), Some(&json!(1)));
        assert!(at(&v, &["a", "c", "d"]).is_none());
    }

    #[test]
    fn metric_takes_first_present_path() {
        let v = json!({"likes": null, "favorite_count": "9"});
        assert_eq!(
            metric(&v, &[&["likes"], &["favorite_count"]]),
            Some(Metric::Text("9".to_string()))
        );
    }

    #[test]
    fn string_skips_non_string_values() {
        let v = json!({"text": 5, "full_text": "hello"});
        assert_eq!(
            string(&v, &[&["text"], &["full_text"]]).as_deref(),
            Some("hello")
        );
    }
}
