//! Rendering benchmark results as text lines or a JSON report.

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;

use crate::harness::{BackendRun, BenchOutcome, BenchPlan};
use crate::schema::{LatencyReport, Measurement, RunMeta};

pub const SCHEMA_VERSION: u32 = 1;

/// Two lines per backend: `<label> <phase> time: <secs>`.
pub fn render_text(runs: &[BackendRun]) -> String {
    let mut out = String::new();
    for run in runs {
        let _ = writeln!(out, "{} parse time: {}", run.label, run.timings.parse_secs());
        let _ = writeln!(
            out,
            "{} deserialize time: {}",
            run.label,
            run.timings.deserialize_secs()
        );
    }
    out
}

pub fn build_report(plan: &BenchPlan, outcome: &BenchOutcome) -> LatencyReport {
    let bytes = outcome.document_bytes as u64;
    let mut measurements = Vec::with_capacity(outcome.runs.len() * 2);
    for run in &outcome.runs {
        let t = &run.timings;
        measurements.push(Measurement {
            name: format!("{}.parse", run.label),
            unit: "s/trial".to_string(),
            trials: t.trials,
            total_ns: t.parse_total.as_nanos(),
            secs_per_trial: t.parse_secs(),
            bytes_processed: Some(bytes.saturating_mul(t.trials)),
            parse_failures: t.parse_failures,
        });
        measurements.push(Measurement {
            name: format!("{}.deserialize", run.label),
            unit: "s/trial".to_string(),
            trials: t.trials,
            total_ns: t.deserialize_total.as_nanos(),
            secs_per_trial: t.deserialize_secs(),
            bytes_processed: None,
            parse_failures: t.parse_failures,
        });
    }

    LatencyReport {
        run: RunMeta {
            schema_version: SCHEMA_VERSION,
            bench_version: env!("CARGO_PKG_VERSION").to_string(),
            seed: plan.document.seed,
            document_name: plan.document.name.clone(),
            input_len: plan.document.input_len,
            num_models: plan.document.num_models,
            document_bytes: outcome.document_bytes,
            type_check: plan.trial.type_check,
            timestamp_unix: now_unix(),
            git_sha: git_sha_short(),
        },
        measurements,
    }
}

/// Write `body` to `out`, or to stdout when no path is given.
pub fn emit(out: Option<&Path>, body: &str) -> io::Result<()> {
    match out {
        Some(path) => fs::write(path, body),
        None => {
            print!("{body}");
            Ok(())
        }
    }
}

fn now_unix() -> String {
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    format!("unix:{secs}")
}

fn git_sha_short() -> Option<String> {
    // Set by CI/build scripts when available.
    std::env::var("GIT_SHA")
        .ok()
        .or_else(|| std::env::var("GITHUB_SHA").ok())
        .map(|s| s.chars().take(12).collect())
}
