use std::hint::black_box;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::backends::{SerdeJson, SimdJson};
use crate::document::DocumentSpec;
use crate::extract::{extract_into, ExtractError, Extracted};
use crate::tree::{JsonBackend, ParseError};
use crate::BackendVariant;

/// Per-call switches for a trial run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrialConfig {
    /// Skip elements of the wrong type instead of failing on them.
    pub type_check: bool,
    /// Print every trial's extracted values to stdout. Dominates the timing.
    pub print_parsed: bool,
}

impl Default for TrialConfig {
    fn default() -> Self {
        Self {
            type_check: true,
            print_parsed: false,
        }
    }
}

/// Everything a full benchmark run needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BenchPlan {
    pub trials: u64,
    pub document: DocumentSpec,
    pub trial: TrialConfig,
}

impl Default for BenchPlan {
    fn default() -> Self {
        Self {
            trials: 10_000,
            document: DocumentSpec::default(),
            trial: TrialConfig::default(),
        }
    }
}

/// Accumulated phase times of one backend over `trials` iterations.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TrialTimings {
    pub trials: u64,
    pub parse_failures: u64,
    /// The first parse error seen; later ones are only counted.
    pub first_parse_error: Option<ParseError>,
    pub parse_total: Duration,
    pub deserialize_total: Duration,
}

impl TrialTimings {
    /// Mean parse time in seconds; `0.0` when no trials ran.
    pub fn parse_secs(&self) -> f64 {
        per_trial(self.parse_total, self.trials)
    }

    /// Mean deserialize time in seconds; `0.0` when no trials ran.
    pub fn deserialize_secs(&self) -> f64 {
        per_trial(self.deserialize_total, self.trials)
    }
}

fn per_trial(total: Duration, trials: u64) -> f64 {
    if trials == 0 {
        return 0.0;
    }
    total.as_secs_f64() / trials as f64
}

/// Run `f` once and return its output together with the elapsed time.
pub fn timed<T>(f: impl FnOnce() -> T) -> (T, Duration) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed())
}

/// Parse and deserialize `json` with `backend` `num_trials` times.
///
/// A trial whose parse fails is counted and its deserialize phase skipped.
/// Only the first failure is logged individually. An extraction error (only possible with type checking off) ends
/// the run.
pub fn run_trial<B: JsonBackend>(
    backend: &B,
    json: &str,
    num_trials: u64,
    cfg: &TrialConfig,
) -> Result<TrialTimings, ExtractError> {
    let mut timings = TrialTimings {
        trials: num_trials,
        ..Default::default()
    };

    for trial in 0..num_trials {
        let (parsed, elapsed) = timed(|| backend.parse(black_box(json)));
        timings.parse_total += elapsed;

        let tree = match parsed {
            Ok(tree) => tree,
            Err(e) => {
                timings.parse_failures += 1;
                if timings.first_parse_error.is_none() {
                    warn!(backend = backend.label(), trial, offset = ?e.offset, "parse failed: {}", e.message);
                    timings.first_parse_error = Some(e);
                }
                continue;
            }
        };

        // Reserved outside the clock.
        let mut extracted = Extracted::reserve_for(&tree);
        let (result, elapsed) = timed(|| extract_into(&tree, cfg.type_check, &mut extracted));
        timings.deserialize_total += elapsed;
        result?;
        let extracted = black_box(extracted);

        if cfg.print_parsed {
            println!("{extracted}");
        }
    }

    if timings.parse_failures > 0 {
        warn!(
            backend = backend.label(),
            parse_failures = timings.parse_failures,
            trials = timings.trials,
            "parse failed in some trials"
        );
    }

    debug!(
        backend = backend.label(),
        trials = timings.trials,
        parse_failures = timings.parse_failures,
        parse_secs = timings.parse_secs(),
        deserialize_secs = timings.deserialize_secs(),
        "trial loop finished"
    );

    Ok(timings)
}

/// Timings of one backend within a benchmark run.
#[derive(Clone, Debug, PartialEq)]
pub struct BackendRun {
    pub label: &'static str,
    pub timings: TrialTimings,
}

#[derive(Clone, Debug)]
pub struct BenchOutcome {
    /// Size of the generated document shared by every backend.
    pub document_bytes: usize,
    pub runs: Vec<BackendRun>,
}

/// Generate the plan's document once and run each selected backend over it,
/// serde_json first.
pub fn run_benchmark(plan: &BenchPlan, variant: BackendVariant) -> Result<BenchOutcome, ExtractError> {
    let json = plan.document.generate();
    info!(
        bytes = json.len(),
        trials = plan.trials,
        type_check = plan.trial.type_check,
        "generated benchmark document"
    );

    let mut runs = Vec::new();
    if variant.includes_serde_json() {
        runs.push(run_backend(&SerdeJson, &json, plan)?);
    }
    if variant.includes_simd_json() {
        runs.push(run_backend(&SimdJson, &json, plan)?);
    }

    Ok(BenchOutcome {
        document_bytes: json.len(),
        runs,
    })
}

fn run_backend<B: JsonBackend>(backend: &B, json: &str, plan: &BenchPlan) -> Result<BackendRun, ExtractError> {
    let timings = run_trial(backend, json, plan.trials, &plan.trial)?;
    Ok(BackendRun {
        label: backend.label(),
        timings,
    })
}
