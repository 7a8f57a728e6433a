//! Pre-benchmark sanity check: parse a tiny fixed document and read `name`.

use tracing::warn;

use crate::backends::{SerdeJson, SimdJson};
use crate::tree::{JsonBackend, JsonTree, ParseError};
use crate::BackendVariant;

pub const SMOKE_DOCUMENT: &str = "{\"name\": \"digits\",\
                                  \"input\": [1, 2, 3, 4, 5, 6, 7, 8, 9],\
                                  \"models\": [{\"m\": 1}, {\"m\": 2}, {\"n\": 1}]}";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SmokeOutcome {
    /// Parsed; carries the `name` field if it was a string.
    Parsed(Option<String>),
    Failed(ParseError),
}

impl SmokeOutcome {
    /// The line printed for this outcome.
    pub fn line(&self, label: &str) -> String {
        match self {
            SmokeOutcome::Parsed(Some(name)) => format!("name: {name}"),
            SmokeOutcome::Parsed(None) => "name: <missing>".to_string(),
            SmokeOutcome::Failed(e) => format!("{label} parse error: {e}"),
        }
    }
}

pub fn check<B: JsonBackend>(backend: &B, text: &str) -> SmokeOutcome {
    match backend.parse(text) {
        Ok(tree) => SmokeOutcome::Parsed(
            tree.field("name")
                .and_then(JsonTree::str_value)
                .map(str::to_owned),
        ),
        Err(e) => {
            warn!(backend = backend.label(), "smoke check parse failed: {e}");
            SmokeOutcome::Failed(e)
        }
    }
}

/// Run the check against every selected backend and return the printable
/// lines, serde_json first. Failures are reported, never fatal.
pub fn run(variant: BackendVariant, text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    if variant.includes_serde_json() {
        lines.push(check(&SerdeJson, text).line(SerdeJson.label()));
    }
    if variant.includes_simd_json() {
        lines.push(check(&SimdJson, text).line(SimdJson.label()));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoke_document_reads_name() {
        assert_eq!(
            check(&SerdeJson, SMOKE_DOCUMENT),
            SmokeOutcome::Parsed(Some("digits".to_string()))
        );
        assert_eq!(
            check(&SimdJson, SMOKE_DOCUMENT),
            SmokeOutcome::Parsed(Some("digits".to_string()))
        );
        assert_eq!(run(BackendVariant::All, SMOKE_DOCUMENT), ["name: digits", "name: digits"]);
    }

    #[test]
    fn test_compact_document() {
        let text = r#"{"name":"digits","input":[1,2,3],"models":[{"m":1}]}"#;
        assert_eq!(run(BackendVariant::All, text), ["name: digits", "name: digits"]);
    }

    #[test]
    fn test_failure_is_reported() {
        let lines = run(BackendVariant::All, r#"{"name": }"#);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("serde_json parse error: "));
        assert!(lines[1].starts_with("simd-json parse error: "));
        assert!(lines.iter().all(|l| l.contains("(offset ")));
    }

    #[test]
    fn test_missing_name() {
        assert_eq!(check(&SerdeJson, r#"{"name": 5}"#).line("serde_json"), "name: <missing>");
        assert_eq!(run(BackendVariant::SimdJson, "[]"), ["name: <missing>"]);
    }
}
