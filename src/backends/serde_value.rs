use serde_json::Value;

use crate::tree::{JsonBackend, JsonTree, ParseError};

/// `serde_json::from_str` into a `serde_json::Value`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SerdeJson;

impl JsonBackend for SerdeJson {
    type Tree = Value;

    fn label(&self) -> &'static str {
        "serde_json"
    }

    fn parse(&self, text: &str) -> Result<Value, ParseError> {
        serde_json::from_str(text).map_err(|e| ParseError {
            message: e.to_string(),
            offset: offset_from_line_col(text, e.line(), e.column()),
        })
    }
}

impl JsonTree for Value {
    fn field(&self, key: &str) -> Option<&Self> {
        self.as_object()?.get(key)
    }

    fn elements(&self) -> Option<&[Self]> {
        self.as_array().map(Vec::as_slice)
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

/// Convert serde_json's 1-based line/column into a byte offset.
///
/// Line 0 means the error has no position (e.g. an I/O error).
pub fn offset_from_line_col(text: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let mut line_start = 0;
    for _ in 1..line {
        line_start += text[line_start..].find('\n')? + 1;
    }
    // column points at the offending byte; 0 means "before the first byte".
    Some((line_start + column.saturating_sub(1)).min(text.len()))
}
