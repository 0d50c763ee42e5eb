//! Front matter extraction from YAML (`---`) or TOML (`+++`) fences.

use serde_json::Value;

use crate::JsonMap;
use crate::error::FrontmatterError;
use crate::schema::json_type_name;

/// Front matter syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontmatterFormat {
    Yaml,
    Toml,
}

impl FrontmatterFormat {
    const fn fence(self) -> &'static str {
        match self {
            Self::Yaml => "---",
            Self::Toml => "+++",
        }
    }
}

/// Split `source` into front matter data and body.
///
/// A document without front matter yields an empty map and the whole
/// source as body, so required fields report as missing.
pub fn extract_frontmatter(source: &str) -> Result<(JsonMap, &str), FrontmatterError> {
    match detect_frontmatter(source)? {
        Some((format, fm, body)) => {
            let data = match format {
                FrontmatterFormat::Yaml => parse_yaml(fm)?,
                FrontmatterFormat::Toml => parse_toml(fm)?,
            };
            Ok((data, body))
        }
        None => Ok((JsonMap::new(), source)),
    }
}

/// Parse a whole data file (YAML or JSON) into a map.
pub fn parse_data(source: &str) -> Result<JsonMap, FrontmatterError> {
    parse_yaml(source)
}

/// Detect and extract front matter.
/// Returns `(format, frontmatter, body)` if found.
fn detect_frontmatter(
    content: &str,
) -> Result<Option<(FrontmatterFormat, &str, &str)>, FrontmatterError> {
    let trimmed = content.trim_start_matches('\u{feff}').trim_start();

    for format in [FrontmatterFormat::Yaml, FrontmatterFormat::Toml] {
        let fence = format.fence();
        let Some(rest) = trimmed.strip_prefix(fence) else {
            continue;
        };
        // The opening fence must be alone on its line
        let Some(rest) = rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
        else {
            continue;
        };

        let (fm, after) = split_at_fence(rest, fence).ok_or(FrontmatterError::Unterminated(fence))?;
        let body = after.trim_start_matches(['\r', '\n']);
        return Ok(Some((format, fm, body)));
    }

    Ok(None)
}

/// Find the closing fence line, returning (inside, after-fence).
fn split_at_fence<'a>(rest: &'a str, fence: &str) -> Option<(&'a str, &'a str)> {
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == fence {
            return Some((&rest[..offset], &rest[offset + line.len()..]));
        }
        offset += line.len();
    }
    None
}

fn parse_yaml(content: &str) -> Result<JsonMap, FrontmatterError> {
    if content.trim().is_empty() {
        return Ok(JsonMap::new());
    }
    into_map(serde_yaml::from_str(content)?)
}

fn parse_toml(content: &str) -> Result<JsonMap, FrontmatterError> {
    let table: toml::Table = toml::from_str(content)?;
    Ok(table
        .into_iter()
        .map(|(key, value)| (key, toml_to_json(value)))
        .collect())
}

fn into_map(value: Value) -> Result<JsonMap, FrontmatterError> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(JsonMap::new()),
        other => Err(FrontmatterError::NotAMapping(json_type_name(&other))),
    }
}

/// Convert TOML to JSON, datetimes become their RFC 3339 text.
fn toml_to_json(value: toml::Value) -> Value {
    match value {
        toml::Value::String(s) => Value::String(s),
        toml::Value::Integer(n) => Value::Number(n.into()),
        toml::Value::Float(n) => serde_json::Number::from_f64(n).map_or(Value::Null, Value::Number),
        toml::Value::Boolean(b) => Value::Bool(b),
        toml::Value::Datetime(dt) => Value::String(dt.to_string()),
        toml::Value::Array(items) => Value::Array(items.into_iter().map(toml_to_json).collect()),
        toml::Value::Table(table) => Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, toml_to_json(value)))
                .collect(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_yaml_frontmatter() {
        let content = "---\ntags: [rust, web]\ndate: 2024-01-01\n---\n\n# Body";
        let (data, body) = extract_frontmatter(content).unwrap();

        assert_eq!(data.get("tags"), Some(&json!(["rust", "web"])));
        assert_eq!(data.get("date"), Some(&json!("2024-01-01")));
        assert_eq!(body, "# Body");
    }

    #[test]
    fn test_yaml_block_list_and_empty_list() {
        let content = "---\ntags:\n  - a\n  - b\nfeatures: []\n---\nBody\n";
        let (data, body) = extract_frontmatter(content).unwrap();
        assert_eq!(data.get("tags"), Some(&json!(["a", "b"])));
        assert_eq!(data.get("features"), Some(&json!([])));
        assert_eq!(body, "Body\n");
    }

    #[test]
    fn test_yaml_scalar_tags_stay_scalar() {
        let content = "---\ntags: not-an-array\n---\n";
        let (data, _) = extract_frontmatter(content).unwrap();
        assert_eq!(data.get("tags"), Some(&json!("not-an-array")));
    }

    #[test]
    fn test_toml_frontmatter() {
        let content = "+++\ntags = [\"a\", \"b\"]\ndate = 2024-06-15\n+++\n\n# Body";
        let (data, body) = extract_frontmatter(content).unwrap();

        assert_eq!(data.get("tags"), Some(&json!(["a", "b"])));
        assert_eq!(data.get("date"), Some(&json!("2024-06-15")));
        assert_eq!(body, "# Body");
    }

    #[test]
    fn test_toml_offset_datetime_is_text() {
        let content = "+++\ndate = 1979-05-27T07:32:00-08:00\n+++\n";
        let (data, _) = extract_frontmatter(content).unwrap();
        assert_eq!(data.get("date"), Some(&json!("1979-05-27T07:32:00-08:00")));
    }

    #[test]
    fn test_no_frontmatter() {
        let content = "# Just content";
        let (data, body) = extract_frontmatter(content).unwrap();
        assert!(data.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_empty_frontmatter() {
        let (data, body) = extract_frontmatter("---\n---\nBody").unwrap();
        assert!(data.is_empty());
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "---\r\ntags: [a]\r\n---\r\nBody";
        let (data, body) = extract_frontmatter(content).unwrap();
        assert_eq!(data.get("tags"), Some(&json!(["a"])));
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_unterminated_frontmatter() {
        let err = extract_frontmatter("---\ntags: [a]\n# Body").unwrap_err();
        assert!(matches!(err, FrontmatterError::Unterminated("---")));
    }

    #[test]
    fn test_fence_must_be_alone_on_line() {
        let content = "----\nnot front matter\n";
        let (data, body) = extract_frontmatter(content).unwrap();
        assert!(data.is_empty());
        assert_eq!(body, content);
    }

    #[test]
    fn test_non_mapping_frontmatter() {
        let err = extract_frontmatter("---\n- a\n- b\n---\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::NotAMapping("array")));
    }

    #[test]
    fn test_invalid_yaml() {
        let err = extract_frontmatter("---\ntags: [a\n---\n").unwrap_err();
        assert!(matches!(err, FrontmatterError::Yaml(_)));
    }

    #[test]
    fn test_parse_data_json() {
        let data = parse_data(r#"{"tags": ["a"], "count": 2}"#).unwrap();
        assert_eq!(data.get("tags"), Some(&json!(["a"])));
        assert_eq!(data.get("count"), Some(&json!(2)));
    }
}
