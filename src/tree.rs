//! Backend-neutral view of a parsed JSON document.

/// Failure to turn JSON text into a tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}{}", offset_suffix(.offset))]
pub struct ParseError {
    pub message: String,
    /// Byte offset into the input, when the backend reports one.
    pub offset: Option<usize>,
}

fn offset_suffix(offset: &Option<usize>) -> String {
    match offset {
        Some(offset) => format!(" (offset {offset})"),
        None => String::new(),
    }
}

/// Read access to a parsed JSON value.
///
/// "Int" means a JSON integer that fits in an `i32`, which is what extraction
/// stores.
pub trait JsonTree: Sized {
    /// Member of an object by key. `None` for missing keys and non-objects.
    fn field(&self, key: &str) -> Option<&Self>;

    /// Elements of an array. `None` for non-arrays.
    fn elements(&self) -> Option<&[Self]>;

    /// Key/value pairs of an object. `None` for non-objects.
    fn entries(&self) -> Option<impl Iterator<Item = (&str, &Self)> + '_>;

    fn int_value(&self) -> Option<i32>;

    fn str_value(&self) -> Option<&str>;

    fn is_int(&self) -> bool {
        self.int_value().is_some()
    }

    fn is_str(&self) -> bool {
        self.str_value().is_some()
    }

    fn is_object(&self) -> bool {
        self.entries().is_some()
    }
}

/// A JSON parsing library under measurement.
pub trait JsonBackend {
    type Tree: JsonTree;

    /// Label used in reports and diagnostics.
    fn label(&self) -> &'static str;

    fn parse(&self, text: &str) -> Result<Self::Tree, ParseError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::{SerdeJson, SimdJson};

    fn predicates<B: JsonBackend>(backend: &B) -> Vec<(bool, bool, bool)> {
        let tree = backend.parse(r#"[7, "s", {"k": 1}, [], null, 3.5]"#).unwrap();
        tree.elements()
            .unwrap()
            .iter()
            .map(|v| (v.is_int(), v.is_str(), v.is_object()))
            .collect()
    }

    #[test]
    fn test_type_predicates_agree() {
        let expected = vec![
            (true, false, false),
            (false, true, false),
            (false, false, true),
            (false, false, false),
            (false, false, false),
            (false, false, false),
        ];
        assert_eq!(predicates(&SerdeJson), expected);
        assert_eq!(predicates(&SimdJson), expected);
    }

    #[test]
    fn test_parse_error_display() {
        let with = ParseError {
            message: "expected value".to_string(),
            offset: Some(9),
        };
        assert_eq!(with.to_string(), "expected value (offset 9)");
        let without = ParseError {
            message: "eof".to_string(),
            offset: None,
        };
        assert_eq!(without.to_string(), "eof");
    }
}
