use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMeta {
    pub schema_version: u32,
    pub bench_version: String,
    pub seed: u64,
    pub document_name: String,
    pub input_len: usize,
    pub num_models: usize,
    pub document_bytes: usize,
    pub type_check: bool,
    /// `unix:<seconds since the epoch>`.
    pub timestamp_unix: String,
    pub git_sha: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    /// `<backend>.parse` or `<backend>.deserialize`.
    pub name: String,
    pub unit: String,

    pub trials: u64,
    pub total_ns: u128,
    pub secs_per_trial: f64,

    pub bytes_processed: Option<u64>,
    pub parse_failures: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LatencyReport {
    pub run: RunMeta,
    pub measurements: Vec<Measurement>,
}
