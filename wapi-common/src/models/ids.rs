//! Identifiers are strings, but older stored collections (integrations,
//! conversations, contacts) used bare numbers. Both decode to a `String`.

use serde::{Deserialize, Deserializer};

pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(deserialize_with = "string_or_number")]
        id: String,
    }

    #[test]
    fn numeric_and_text_ids_decode_the_same() {
        let a: Row = serde_json::from_str(r#"{"id": 7}"#).unwrap();
        let b: Row = serde_json::from_str(r#"{"id": "7"}"#).unwrap();
        assert_eq!(a.id, "7");
        assert_eq!(a.id, b.id);
    }
}
