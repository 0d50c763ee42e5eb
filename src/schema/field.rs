//! Field declarations and per-value type checks.

use serde_json::Value;
use std::fmt;

use crate::utils::date::DateTimeUtc;

/// The type a declared field must conform to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Array of strings. Empty arrays and duplicate entries are accepted.
    StringList,
    /// Calendar date string, see [`DateTimeUtc::parse`].
    Date,
}

impl FieldKind {
    /// Check `value` against this kind, returning the normalized value.
    ///
    /// On mismatch, returns a description of what was found instead.
    pub fn check(self, value: &Value) -> Result<Value, String> {
        match self {
            Self::StringList => check_string_list(value),
            Self::Date => check_date(value),
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::StringList => "array of strings",
            Self::Date => "date",
        })
    }
}

fn check_string_list(value: &Value) -> Result<Value, String> {
    let Value::Array(items) = value else {
        return Err(json_type_name(value).to_owned());
    };
    if let Some((index, item)) = items.iter().enumerate().find(|(_, v)| !v.is_string()) {
        return Err(format!(
            "array with {} at index {index}",
            json_type_name(item)
        ));
    }
    Ok(value.clone())
}

fn check_date(value: &Value) -> Result<Value, String> {
    match value {
        Value::String(s) => DateTimeUtc::parse(s)
            .map(|dt| Value::String(dt.to_iso()))
            .ok_or_else(|| format!("invalid date string `{s}`")),
        other => Err(json_type_name(other).to_owned()),
    }
}

/// Human-readable JSON type name.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One named field of a collection schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldDecl {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldDecl {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_string_list_accepts_empty_and_duplicates() {
        assert_eq!(FieldKind::StringList.check(&json!([])), Ok(json!([])));
        assert_eq!(
            FieldKind::StringList.check(&json!(["rust", "rust"])),
            Ok(json!(["rust", "rust"]))
        );
    }

    #[test]
    fn test_string_list_mismatch() {
        assert_eq!(
            FieldKind::StringList.check(&json!("not-an-array")),
            Err("string".to_string())
        );
        assert_eq!(
            FieldKind::StringList.check(&json!(null)),
            Err("null".to_string())
        );
        assert_eq!(
            FieldKind::StringList.check(&json!(["a", 1])),
            Err("array with number at index 1".to_string())
        );
    }

    #[test]
    fn test_date_normalizes() {
        assert_eq!(
            FieldKind::Date.check(&json!("2024-06-15")),
            Ok(json!("2024-06-15"))
        );
        assert_eq!(
            FieldKind::Date.check(&json!("2024-06-15T10:00:00+02:00")),
            Ok(json!("2024-06-15T08:00:00Z"))
        );
    }

    #[test]
    fn test_date_keeps_time_at_utc_midnight() {
        assert_eq!(
            FieldKind::Date.check(&json!("2024-06-15T00:00:00Z")),
            Ok(json!("2024-06-15T00:00:00Z"))
        );
        assert_eq!(
            FieldKind::Date.check(&json!("2024-06-15T02:00:00+02:00")),
            Ok(json!("2024-06-15T00:00:00Z"))
        );
    }

    #[test]
    fn test_date_mismatch() {
        assert_eq!(
            FieldKind::Date.check(&json!("2024-02-30")),
            Err("invalid date string `2024-02-30`".to_string())
        );
        assert_eq!(
            FieldKind::Date.check(&json!(20240615)),
            Err("number".to_string())
        );
    }

    #[test]
    fn test_field_decl_constructors() {
        let tags = FieldDecl::required("tags", FieldKind::StringList);
        assert!(tags.required);
        let features = FieldDecl::optional("features", FieldKind::StringList);
        assert!(!features.required);
        assert_eq!(features.kind.to_string(), "array of strings");
    }
}
