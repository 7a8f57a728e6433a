use anyhow::Context;
use clap::{Parser, ValueEnum};
use json_latency_bench::document::DocumentSpec;
use json_latency_bench::harness::{self, BenchPlan, TrialConfig};
use json_latency_bench::{report, smoke, BackendVariant};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    /// `<backend> <phase> time: <secs>` lines.
    Text,
    /// Full JSON report with run metadata.
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "json-latency-bench")]
#[command(about = "Parse and deserialize latency of serde_json vs simd-json on a synthetic document")]
struct Args {
    /// Number of timed trials per backend.
    #[arg(long, default_value_t = BenchPlan::default().trials)]
    trials: u64,

    /// Number of single-key objects in `models`.
    #[arg(long, default_value_t = DocumentSpec::default().num_models)]
    models: usize,

    /// Number of integers in `input`.
    #[arg(long, default_value_t = DocumentSpec::default().input_len)]
    input_len: usize,

    /// Value of the document's `name` field.
    #[arg(long, default_value_t = DocumentSpec::default().name)]
    name: String,

    /// Random seed for deterministic generation.
    #[arg(long, default_value_t = DocumentSpec::default().seed)]
    seed: u64,

    /// Which backend(s) to benchmark.
    #[arg(long, value_enum, default_value_t = BackendVariant::All)]
    backend: BackendVariant,

    /// Convert values without checking their types; a mismatch aborts the run.
    #[arg(long, default_value_t = false)]
    no_type_check: bool,

    /// Print every trial's extracted values (slow).
    #[arg(long, default_value_t = false)]
    print_parsed: bool,

    /// Skip the pre-benchmark smoke check.
    #[arg(long, default_value_t = false)]
    skip_smoke: bool,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Where to write the report. If omitted, prints to stdout.
    #[arg(long)]
    out: Option<PathBuf>,
}

impl Args {
    fn plan(&self) -> BenchPlan {
        BenchPlan {
            trials: self.trials,
            document: DocumentSpec::new(self.name.clone(), self.models, self.input_len)
                .with_seed(self.seed),
            trial: TrialConfig {
                type_check: !self.no_type_check,
                print_parsed: self.print_parsed,
            },
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let args = Args::parse();

    let plan = args.plan();

    if !args.skip_smoke {
        for line in smoke::run(args.backend, smoke::SMOKE_DOCUMENT) {
            println!("{line}");
        }
    }

    let outcome =
        harness::run_benchmark(&plan, args.backend).context("deserialize phase failed")?;

    let body = match args.format {
        Format::Text => report::render_text(&outcome.runs),
        Format::Json => {
            let report = report::build_report(&plan, &outcome);
            let mut json = serde_json::to_string_pretty(&report)?;
            json.push('\n');
            json
        }
    };

    report::emit(args.out.as_deref(), &body)
        .with_context(|| format!("writing report to {:?}", args.out))?;

    Ok(())
}
