use serde_json::{Map, Value};

/// A free-form JSON object, used for asset definitions and tags.
pub type Document = Map<String, Value>;

/// Serializes an asset definition the way it is hashed into the asset id.
///
/// The document is pretty printed with two space indentation and every object's keys sorted.
/// A missing definition serializes to an empty byte string.
pub fn canonical_definition(definition: Option<&Document>) -> Result<Vec<u8>, serde_json::Error> {
    let Some(definition) = definition else {
        return Ok(Vec::new());
    };

    let sorted = sort_keys(&Value::Object(definition.clone()));
    serde_json::to_vec_pretty(&sorted)
}

// Maps keep insertion order when serde_json's `preserve_order` feature is enabled anywhere
// in the build, so the order is imposed explicitly.
fn sort_keys(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut entries: Vec<(&String, &Value)> = map.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));
            Value::Object(
                entries
                    .into_iter()
                    .map(|(key, value)| (key.clone(), sort_keys(value)))
                    .collect(),
            )
        }
        Value::Array(items) => Value::Array(items.iter().map(sort_keys).collect()),
        value => value.clone(),
    }
}

/// Parses an optional JSON object. Empty input and `null` are both treated as absent.
pub fn parse_document(bytes: &[u8]) -> Result<Option<Document>, serde_json::Error> {
    if bytes.is_empty() {
        return Ok(None);
    }
    serde_json::from_slice(bytes)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn document(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_missing_definition() -> anyhow::Result<()> {
        assert!(canonical_definition(None)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_canonical_form() -> anyhow::Result<()> {
        let definition = document(json!({ "type": "metal" }));
        assert_eq!(
            canonical_definition(Some(&definition))?,
            b"{\n  \"type\": \"metal\"\n}"
        );
        Ok(())
    }

    #[test]
    fn test_keys_are_sorted_recursively() -> anyhow::Result<()> {
        let first: Document =
            serde_json::from_str(r#"{"b": 1, "a": {"d": [{"z": 0, "y": 1}], "c": null}}"#)?;
        let second: Document =
            serde_json::from_str(r#"{"a": {"c": null, "d": [{"y": 1, "z": 0}]}, "b": 1}"#)?;

        let canonical = canonical_definition(Some(&first))?;
        assert_eq!(canonical, canonical_definition(Some(&second))?);

        let text = String::from_utf8(canonical)?;
        assert!(text.find("\"a\"") < text.find("\"b\""));
        assert!(text.find("\"y\"") < text.find("\"z\""));

        Ok(())
    }

    #[test]
    fn test_parse_document() -> anyhow::Result<()> {
        assert_eq!(parse_document(b"")?, None);
        assert_eq!(parse_document(b"null")?, None);
        assert_eq!(
            parse_document(br#"{"type":"metal"}"#)?,
            Some(document(json!({ "type": "metal" })))
        );
        assert!(parse_document(b"{").is_err());
        assert!(parse_document(b"[1, 2]").is_err());
        Ok(())
    }
}
