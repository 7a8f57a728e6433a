use simd_json::prelude::*;
use simd_json::OwnedValue;

use crate::tree::{JsonBackend, JsonTree, ParseError};

/// `simd_json::to_owned_value` into a `simd_json::OwnedValue`.
///
/// simd-json parses in place, so every parse copies the text into a fresh
/// buffer first. The copy is part of what gets timed.
#[derive(Clone, Copy, Debug, Default)]
pub struct SimdJson;

impl JsonBackend for SimdJson {
    type Tree = OwnedValue;

    fn label(&self) -> &'static str {
        "simd-json"
    }

    fn parse(&self, text: &str) -> Result<OwnedValue, ParseError> {
        let mut buf = text.as_bytes().to_vec();
        simd_json::to_owned_value(&mut buf).map_err(|e| ParseError {
            message: e.to_string(),
            offset: Some(e.index().min(text.len())),
        })
    }
}

impl JsonTree for OwnedValue {
    fn field(&self, key: &str) -> Option<&Self> {
        self.as_object()?.get(key)
    }

    fn elements(&self) -> Option<&[Self]> {
        self.as_array().map(|a| a.as_slice())
    }

    fn entries(&self) -> Option<impl Iterator<Item = (&str, &Self)> + '_> {
        self.as_object()
            .map(|obj| obj.iter().map(|(k, v)| (k.as_str(), v)))
    }

    fn int_value(&self) -> Option<i32> {
        self.as_i64().and_then(|v| i32::try_from(v).ok())
    }

    fn str_value(&self) -> Option<&str> {
        self.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_access() {
        let tree = SimdJson
            .parse(r#"{"name":"digits","input":[1,2,3],"models":[{"m":1}]}"#)
            .unwrap();
        assert_eq!(tree.field("name").and_then(|v| v.str_value()), Some("digits"));
        assert_eq!(tree.field("input").and_then(|v| v.elements()).map(|a| a.len()), Some(3));

        let model = &tree.field("models").unwrap().elements().unwrap()[0];
        let entries: Vec<_> = model.entries().unwrap().collect();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].0, "m");
        assert_eq!(entries[0].1.int_value(), Some(1));
    }

    #[test]
    fn test_int_value_bounds() {
        let tree = SimdJson.parse("[1, -4, 2147483648, 1.5, \"7\"]").unwrap();
        let ints: Vec<_> = tree.elements().unwrap().iter().map(|v| v.int_value()).collect();
        assert_eq!(ints, vec![Some(1), Some(-4), None, None, None]);
    }

    #[test]
    fn test_malformed_is_error() {
        let err = SimdJson.parse(r#"{"name": }"#).unwrap_err();
        assert!(err.offset.is_some());
        assert!(!err.message.is_empty());
    }

    #[test]
    fn test_input_text_untouched() {
        let text = String::from(r#"{"name": "digits"}"#);
        let _ = SimdJson.parse(&text).unwrap();
        assert_eq!(text, r#"{"name": "digits"}"#);
    }
}
