use clap::Parser;
use ledger_measurement_bot::auth;
use ledger_measurement_bot::config::{Dimensions, ErrorPolicy, WriteMode};
use ledger_measurement_bot::graph;
use ledger_measurement_bot::ledger::{HttpLedger, LedgerApi};
use ledger_measurement_bot::replay;
use ledger_measurement_bot::run_benchmarks;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "bot")]
struct Args {
    /// Base URL of the ledger's HTTP JSON API.
    #[arg(long, env = "LEDGER_BASE_URL", default_value = "http://localhost:7575")]
    base_url: String,

    /// Party namespace suffix; must be updated after a ledger restart.
    #[arg(long, env = "LEDGER_NAMESPACE", default_value = "test")]
    namespace: String,

    /// Number of simulated parties.
    #[arg(long, default_value_t = 10)]
    parties: usize,

    /// Licenses per party.
    #[arg(long, default_value_t = 10)]
    licenses: usize,

    /// Datasets per party.
    #[arg(long, default_value_t = 10)]
    datasets: usize,

    /// Models per party (chained when > 1).
    #[arg(long, default_value_t = 1)]
    models: usize,

    /// Datasets consumed by each model, sampled without replacement.
    #[arg(long, default_value_t = 10)]
    fan_in: usize,

    /// Entities sampled per traversal benchmark.
    #[arg(long, default_value_t = 10)]
    sample: usize,

    /// Per-request timeout in seconds.
    #[arg(long, default_value_t = 30)]
    timeout_secs: u64,

    /// Write concurrency: "fan-out" or "sequential".
    #[arg(long, default_value = "fan-out")]
    write_mode: String,

    /// Error policy: "lenient" (log and continue) or "strict" (abort on
    /// first failure).
    #[arg(long, default_value = "lenient")]
    policy: String,

    /// Seed for reproducible graph generation and sampling.
    #[arg(long)]
    seed: Option<u64>,
}

fn parse_write_mode(s: &str) -> WriteMode {
    match s.to_ascii_lowercase().as_str() {
        "sequential" | "seq" => WriteMode::Sequential,
        _ => WriteMode::FanOut,
    }
}

fn parse_policy(s: &str) -> ErrorPolicy {
    match s.to_ascii_lowercase().as_str() {
        "strict" => ErrorPolicy::Strict,
        _ => ErrorPolicy::Lenient,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let write_mode = parse_write_mode(&args.write_mode);
    let policy = parse_policy(&args.policy);
    let dims = Dimensions {
        parties: args.parties,
        licenses_per_party: args.licenses,
        datasets_per_party: args.datasets,
        models_per_party: args.models,
        datasets_per_model: args.fan_in,
    };

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let token = auth::mint_token()?;
    let ledger = HttpLedger::new(
        &args.base_url,
        &token,
        Duration::from_secs(args.timeout_secs),
    )?;

    // Healthcheck: probe bodies are logged only.
    let readyz = ledger.readyz().await?;
    info!(body = %readyz, "readyz");
    let user = ledger.user().await?;
    info!(body = %user, "user");

    let graph = graph::generate(&dims, &args.namespace, &mut rng)?;
    info!(
        licenses = dims.total_licenses(),
        datasets = dims.total_datasets(),
        models = dims.total_models(),
        "generated test graph"
    );

    let outcome = replay::write_graph(&ledger, &graph, write_mode, policy).await?;
    info!(
        attempted = outcome.attempted,
        failed = outcome.failed,
        mode = ?write_mode,
        "write replay complete"
    );

    let reports = run_benchmarks(&ledger, &graph, policy, args.sample, &mut rng).await?;
    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}
