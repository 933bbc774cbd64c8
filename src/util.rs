use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize a registry status flag.
///
/// The registry encodes flags inconsistently: `"true"`/`"false"` for
/// `is_siege`, `"O"`/`"N"` for the social economy flag, and sometimes plain
/// booleans, numbers or `null`. Anything unrecognised reads as `false` so a
/// single odd record never fails the page.
pub fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => matches!(
            s.trim().to_lowercase().as_str(),
            "true" | "1" | "o" | "oui" | "yes"
        ),
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    })
}

/// Deserialize an optional text field that the registry may send as a
/// string or a bare number (coordinates, postal codes).
///
/// Numbers keep their JSON spelling. Other shapes read as `None`.
pub fn deserialize_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(_) | Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// Like [`deserialize_opt_text`], for fields that fall back to an empty
/// string.
pub fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(deserialize_opt_text(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Flagged {
        #[serde(default, deserialize_with = "deserialize_flag")]
        flag: bool,
    }

    #[derive(Deserialize)]
    struct Texted {
        #[serde(default, deserialize_with = "deserialize_opt_text")]
        text: Option<String>,
    }

    fn parse(json: &str) -> bool {
        serde_json::from_str::<Flagged>(json).unwrap().flag
    }

    fn parse_text(json: &str) -> Option<String> {
        serde_json::from_str::<Texted>(json).unwrap().text
    }

    #[test]
    fn test_flag_encodings() {
        assert!(parse(r#"{"flag": "true"}"#));
        assert!(parse(r#"{"flag": "O"}"#));
        assert!(parse(r#"{"flag": true}"#));
        assert!(parse(r#"{"flag": 1}"#));
        assert!(!parse(r#"{"flag": "N"}"#));
        assert!(!parse(r#"{"flag": "false"}"#));
        assert!(!parse(r#"{"flag": null}"#));
        assert!(!parse(r#"{}"#));
    }

    #[test]
    fn test_unknown_flag_reads_as_false() {
        assert!(!parse(r#"{"flag": "S"}"#));
        assert!(!parse(r#"{"flag": "maybe"}"#));
        assert!(!parse(r#"{"flag": ["O"]}"#));
        assert!(!parse(r#"{"flag": {"value": true}}"#));
    }

    #[test]
    fn test_text_accepts_strings_and_numbers() {
        assert_eq!(parse_text(r#"{"text": "43.92"}"#).as_deref(), Some("43.92"));
        assert_eq!(parse_text(r#"{"text": 43.92}"#).as_deref(), Some("43.92"));
        assert_eq!(parse_text(r#"{"text": 30900}"#).as_deref(), Some("30900"));
        assert_eq!(parse_text(r#"{"text": null}"#), None);
        assert_eq!(parse_text(r#"{"text": [1, 2]}"#), None);
        assert_eq!(parse_text(r#"{}"#), None);
    }
}
