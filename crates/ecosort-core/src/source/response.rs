//! Parsing of untrusted classification responses.
//!
//! Language models wrap JSON in markdown fences, add prose around it, change
//! the case of keys and answer `true` where a string was asked for. Nothing
//! here assumes the response honours the requested format; anything that
//! cannot be read becomes [`SourceError::Parse`] and the caller falls back to
//! local rules.

use super::SourceError;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

/// One classification as returned by an external service. Every field is
/// optional and free text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawExternalClassification {
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(
        rename = "type",
        default,
        deserialize_with = "loose_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub disposal: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub recyclable: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub reusable: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub hazardous: Option<String>,
    #[serde(default, deserialize_with = "loose_string", skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

/// Accept strings, booleans and numbers for a text field. Booleans become
/// "yes"/"no"; null and nested values are treated as absent.
fn loose_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Bool(true)) => Some("yes".to_string()),
        Some(Value::Bool(false)) => Some("no".to_string()),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Cut the JSON payload out of a model response.
pub fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();

    // ```json ... ``` or plain ``` ... ``` blocks
    if let Some(start) = trimmed.find("```") {
        let after_tick = &trimmed[start + 3..];
        let content_start = after_tick.find('\n').map_or(0, |n| n + 1);
        if let Some(end) = after_tick[content_start..].find("```") {
            return after_tick[content_start..content_start + end].trim();
        }
    }

    // Raw object or array surrounded by prose
    if let Some(start) = trimmed.find(|c: char| c == '{' || c == '[') {
        let close = if trimmed[start..].starts_with('{') { '}' } else { ']' };
        if let Some(end) = trimmed.rfind(close) {
            if end > start {
                return &trimmed[start..=end];
            }
        }
    }

    trimmed
}

/// Parse a batch classification response.
///
/// Accepts `{"classifications": [...]}`, a bare array, or a single
/// classification object. Entries that are not objects are skipped.
pub fn parse_batch(text: &str) -> Result<Vec<RawExternalClassification>, SourceError> {
    let json = extract_json(text);
    let value: Value = serde_json::from_str(json)
        .map_err(|e| SourceError::Parse(format!("response is not valid JSON: {e}")))?;

    let entries = match lowercase_keys(value) {
        Value::Array(entries) => entries,
        Value::Object(mut map) => match map.remove("classifications") {
            Some(Value::Array(entries)) => entries,
            Some(_) => {
                return Err(SourceError::Parse(
                    "'classifications' is not an array".into(),
                ))
            }
            None if map.contains_key("label") => vec![Value::Object(map)],
            None => {
                return Err(SourceError::Parse(
                    "expected a 'classifications' array".into(),
                ))
            }
        },
        _ => {
            return Err(SourceError::Parse(
                "expected a JSON object or array".into(),
            ))
        }
    };

    let mut parsed = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        match serde_json::from_value::<RawExternalClassification>(entry) {
            Ok(raw) => parsed.push(raw),
            Err(e) => warn!(index, error = %e, "ignoring malformed classification entry"),
        }
    }
    debug!(entries = parsed.len(), "parsed batch classification response");
    Ok(parsed)
}

/// Lower-case object keys, one level into arrays and objects.
fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| {
                    let v = match v {
                        Value::Array(items) => {
                            Value::Array(items.into_iter().map(lowercase_object).collect())
                        }
                        other => other,
                    };
                    (k.to_lowercase(), v)
                })
                .collect(),
        ),
        Value::Array(items) => Value::Array(items.into_iter().map(lowercase_object).collect()),
        other => other,
    }
}

fn lowercase_object(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            Value::Object(map.into_iter().map(|(k, v)| (k.to_lowercase(), v)).collect())
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_raw() {
        let input = r#"{"classifications": []}"#;
        assert_eq!(extract_json(input), input);
    }

    #[test]
    fn test_extract_json_code_block() {
        let input = "Here you go:\n```json\n{\"classifications\": []}\n```\nDone.";
        assert_eq!(extract_json(input), r#"{"classifications": []}"#);
    }

    #[test]
    fn test_extract_json_array_with_prose() {
        let input = "Sure! [{\"label\": \"Glass\"}] Hope this helps.";
        assert_eq!(extract_json(input), r#"[{"label": "Glass"}]"#);
    }

    #[test]
    fn test_parse_wrapped_batch() {
        let text = r#"{
            "classifications": [
                {
                    "label": "Plastic bottle",
                    "type": "non-biodegradable",
                    "material": "Polyethylene terephthalate (PET)",
                    "disposal": "Rinse and place in plastic recycling",
                    "recyclable": "yes",
                    "hazardous": "no",
                    "icon": "fas fa-wine-bottle"
                },
                { "label": "Cardboard", "recyclable": "Yes" }
            ]
        }"#;
        let batch = parse_batch(text).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].kind.as_deref(), Some("non-biodegradable"));
        assert_eq!(batch[0].icon.as_deref(), Some("fas fa-wine-bottle"));
        assert!(batch[1].material.is_none());
    }

    #[test]
    fn test_parse_bare_array() {
        let batch = parse_batch(r#"[{"label": "Glass", "recyclable": "yes"}]"#).unwrap();
        assert_eq!(batch[0].label.as_deref(), Some("Glass"));
    }

    #[test]
    fn test_parse_single_object() {
        let batch = parse_batch(r#"{"label": "Glass", "type": "non-biodegradable"}"#).unwrap();
        assert_eq!(batch.len(), 1);
    }

    #[test]
    fn test_loose_field_types() {
        let text = r#"[{"label": "Battery", "recyclable": true, "hazardous": false,
                        "material": null, "reusable": 0, "icon": ["fas fa-x"]}]"#;
        let raw = &parse_batch(text).unwrap()[0];
        assert_eq!(raw.recyclable.as_deref(), Some("yes"));
        assert_eq!(raw.hazardous.as_deref(), Some("no"));
        assert_eq!(raw.reusable.as_deref(), Some("0"));
        assert!(raw.material.is_none());
        assert!(raw.icon.is_none());
    }

    #[test]
    fn test_key_case_ignored() {
        let text = r#"{"Classifications": [{"Label": "Glass", "Type": "non-biodegradable"}]}"#;
        let raw = &parse_batch(text).unwrap()[0];
        assert_eq!(raw.label.as_deref(), Some("Glass"));
        assert_eq!(raw.kind.as_deref(), Some("non-biodegradable"));
    }

    #[test]
    fn test_non_object_entries_skipped() {
        let batch = parse_batch(r#"["Glass", {"label": "Paper"}, 3]"#).unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].label.as_deref(), Some("Paper"));
    }

    #[test]
    fn test_prose_only_is_parse_error() {
        let err = parse_batch("I cannot classify these items.").unwrap_err();
        assert!(matches!(err, SourceError::Parse(_)));
    }

    #[test]
    fn test_wrong_shape_is_parse_error() {
        assert!(matches!(
            parse_batch(r#"{"items": []}"#),
            Err(SourceError::Parse(_))
        ));
        assert!(matches!(
            parse_batch(r#"{"classifications": "none"}"#),
            Err(SourceError::Parse(_))
        ));
        assert!(matches!(parse_batch("42"), Err(SourceError::Parse(_))));
    }
}
