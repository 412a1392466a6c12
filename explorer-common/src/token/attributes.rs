use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::MetadataError;

/// One `{trait_type, value}` pair of a token's attribute container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub trait_type: String,
    pub value: String,
}

impl Attribute {
    pub fn new(trait_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self { trait_type: trait_type.into(), value: value.into() }
    }
}

/// Where the attribute container lives among a token's properties.
///
/// Serialized untagged, so configuration can say either `2` or `"tokenData"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeSlot {
    Index(usize),
    Key(String),
}

impl Default for AttributeSlot {
    fn default() -> Self {
        AttributeSlot::Index(2)
    }
}

#[derive(Deserialize)]
struct Container {
    attributes: Vec<RawAttribute>,
}

#[derive(Deserialize)]
struct RawAttribute {
    trait_type: String,
    value: Value,
}

/// Decodes `{"attributes": [{"trait_type": ..., "value": ...}]}` preserving order.
///
/// String values are taken verbatim; any other JSON value keeps its JSON text.
pub fn decode_container(raw: &str) -> Result<Vec<Attribute>, MetadataError> {
    let container: Container = serde_json::from_str(raw)
        .map_err(|e| MetadataError::MalformedJson(e.to_string()))?;

    Ok(container
        .attributes
        .into_iter()
        .map(|raw| {
            let value = match raw.value {
                Value::String(s) => s,
                other => other.to_string(),
            };
            Attribute { trait_type: raw.trait_type, value }
        })
        .collect())
}

/// Encodes attributes back into the container format.
pub fn encode_container(attributes: &[Attribute]) -> String {
    serde_json::json!({ "attributes": attributes }).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_keeps_order_and_stringifies() {
        let raw = r#"{"attributes":[
            {"trait_type":"Level","value":3},
            {"trait_type":"Nickname","value":"abc"},
            {"trait_type":"Shiny","value":true}
        ]}"#;

        let attrs = decode_container(raw).unwrap();
        let names: Vec<_> = attrs.iter().map(|a| a.trait_type.as_str()).collect();

        assert_eq!(names, vec!["Level", "Nickname", "Shiny"]);
        assert_eq!(attrs[0].value, "3");
        assert_eq!(attrs[2].value, "true");
    }

    #[test]
    fn test_decode_rejects_missing_attributes_field() {
        let result = decode_container(r#"{"traits":[]}"#);
        assert!(matches!(result, Err(MetadataError::MalformedJson(_))));
    }

    #[test]
    fn test_decode_rejects_broken_json() {
        let result = decode_container(r#"{"attributes":[{"trait_type":"Nickname""#);
        assert!(matches!(result, Err(MetadataError::MalformedJson(_))));
    }

    #[test]
    fn test_encode_is_readable_by_decode() {
        let attrs = vec![Attribute::new("Nickname", "x"), Attribute::new("Level", "1")];
        let decoded = decode_container(&encode_container(&attrs)).unwrap();
        assert_eq!(decoded, attrs);
    }

    #[test]
    fn test_slot_deserializes_untagged() {
        let index: AttributeSlot = serde_json::from_str("2").unwrap();
        let key: AttributeSlot = serde_json::from_str("\"tokenData\"").unwrap();

        assert_eq!(index, AttributeSlot::Index(2));
        assert_eq!(key, AttributeSlot::Key("tokenData".into()));
    }
}
