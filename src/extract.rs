//! Tree-to-values conversion (the "deserialize" phase).

use std::fmt;

use crate::tree::JsonTree;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExtractError {
    #[error("missing or non-{expected} field `{field}`")]
    MissingField {
        field: &'static str,
        expected: &'static str,
    },
    #[error("expected {expected} in `{field}`[{index}]")]
    TypeMismatch {
        field: &'static str,
        index: usize,
        expected: &'static str,
    },
}

/// Values pulled out of one parsed document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    pub input_values: Vec<i32>,
    pub model_entries: Vec<(String, i32)>,
}

impl fmt::Display for Extracted {
    /// Two lines: `[1, 2, 3]` then `[(a, 1), (b, 2)]`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, v) in self.input_values.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{v}")?;
        }
        f.write_str("]\n[")?;
        for (i, (k, v)) in self.model_entries.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "({k}, {v})")?;
        }
        f.write_str("]")
    }
}

impl Extracted {
    /// Empty buffers sized for the `input` and `models` arrays of `tree`.
    pub fn reserve_for<T: JsonTree>(tree: &T) -> Self {
        let len = |field: &str| tree.field(field).and_then(JsonTree::elements).map_or(0, <[T]>::len);
        Self {
            input_values: Vec::with_capacity(len("input")),
            model_entries: Vec::with_capacity(len("models")),
        }
    }
}

/// Walk `tree` and collect `input` and `models`.
///
/// With `type_check` set, anything of the wrong shape is skipped. Without it,
/// the first mismatch is returned as an error.
pub fn extract<T: JsonTree>(tree: &T, type_check: bool) -> Result<Extracted, ExtractError> {
    let mut out = Extracted::reserve_for(tree);
    extract_into(tree, type_check, &mut out)?;
    Ok(out)
}

/// Like [`extract`], appending to buffers the caller already reserved.
pub fn extract_into<T: JsonTree>(
    tree: &T,
    type_check: bool,
    out: &mut Extracted,
) -> Result<(), ExtractError> {
    // Read but never stored.
    match tree.field("name").and_then(JsonTree::str_value) {
        Some(name) => {
            std::hint::black_box(name);
        }
        None if !type_check => {
            return Err(ExtractError::MissingField {
                field: "name",
                expected: "string",
            })
        }
        None => {}
    }

    let input = array_field(tree, "input", type_check)?;
    let models = array_field(tree, "models", type_check)?;

    for (index, elem) in input.iter().enumerate() {
        match elem.int_value() {
            Some(v) => out.input_values.push(v),
            None if type_check => {}
            None => {
                return Err(ExtractError::TypeMismatch {
                    field: "input",
                    index,
                    expected: "integer",
                })
            }
        }
    }

    for (index, entry) in models.iter().enumerate() {
        let Some(pairs) = entry.entries() else {
            if type_check {
                continue;
            }
            return Err(ExtractError::TypeMismatch {
                field: "models",
                index,
                expected: "object",
            });
        };
        for (key, value) in pairs {
            match value.int_value() {
                Some(v) => out.model_entries.push((key.to_owned(), v)),
                None if type_check => {}
                None => {
                    return Err(ExtractError::TypeMismatch {
                        field: "models",
                        index,
                        expected: "integer value",
                    })
                }
            }
        }
    }

    Ok(())
}

fn array_field<'t, T: JsonTree>(
    tree: &'t T,
    field: &'static str,
    type_check: bool,
) -> Result<&'t [T], ExtractError> {
    match tree.field(field).and_then(JsonTree::elements) {
        Some(items) => Ok(items),
        None if type_check => Ok(&[]),
        None => Err(ExtractError::MissingField {
            field,
            expected: "array",
        }),
    }
}
