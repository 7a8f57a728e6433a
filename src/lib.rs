use clap::ValueEnum;

pub mod backends;
pub mod document;
pub mod extract;
pub mod harness;
pub mod report;
pub mod schema;
pub mod smoke;
pub mod tree;

/// JSON backend selection for a benchmark run.
#[derive(Clone, Copy, Debug, Default, ValueEnum, PartialEq, Eq)]
pub enum BackendVariant {
    /// Run every backend, serde_json first.
    #[default]
    All,
    /// `serde_json::Value` only.
    SerdeJson,
    /// `simd_json::OwnedValue` only.
    SimdJson,
}

impl BackendVariant {
    pub fn includes_serde_json(self) -> bool {
        matches!(self, BackendVariant::All | BackendVariant::SerdeJson)
    }

    pub fn includes_simd_json(self) -> bool {
        matches!(self, BackendVariant::All | BackendVariant::SimdJson)
    }
}
