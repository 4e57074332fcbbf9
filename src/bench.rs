//! Traversal benchmark runner.
//!
//! Draws a uniform random sample of generated models and licenses, replays
//! each traversal against the ledger concurrently, times every call
//! wall-clock start-to-finish, and summarizes the per-call durations.

use crate::config::ErrorPolicy;
use crate::graph::TestGraph;
use crate::ledger::{LedgerApi, LedgerError};
use crate::stats::{self, Histo};
use crate::traversal::TraversalRunner;
use crate::types::{License, Model};
use anyhow::Result;
use futures_util::future;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::future::Future;
use std::time::Instant;
use tracing::info;

/// Per-traversal latency summary. Mean and standard deviation are in
/// milliseconds, rounded to one decimal place; percentiles in whole
/// milliseconds.
#[derive(Clone, Debug, Serialize)]
pub struct BenchReport {
    pub name: &'static str,
    pub calls: usize,
    pub mean_ms: f64,
    pub std_dev_ms: f64,
    pub p50_ms: u64,
    pub p95_ms: u64,
    pub p99_ms: u64,
    pub max_ms: u64,
}

impl BenchReport {
    fn from_durations(name: &'static str, durations_ms: &[f64]) -> Self {
        let mut histo = Histo::default();
        for d in durations_ms {
            histo.record(d.round() as u64);
        }
        Self {
            name,
            calls: durations_ms.len(),
            mean_ms: stats::round1(stats::mean(durations_ms)),
            std_dev_ms: stats::round1(stats::population_std_dev(durations_ms)),
            p50_ms: histo.p50(),
            p95_ms: histo.p95(),
            p99_ms: histo.p99(),
            max_ms: histo.max(),
        }
    }
}

/// Run the three traversal benchmarks over a sample of `sample_size`
/// entities. The sample clamps to the population when the graph is smaller.
pub async fn run_benchmarks<R: Rng>(
    ledger: &dyn LedgerApi,
    graph: &TestGraph,
    policy: ErrorPolicy,
    sample_size: usize,
    rng: &mut R,
) -> Result<Vec<BenchReport>> {
    let runner = TraversalRunner::new(ledger, policy);

    let models: Vec<Model> = {
        let pool = graph.all_models();
        pool.choose_multiple(rng, sample_size.min(pool.len()))
            .map(|m| (*m).clone())
            .collect()
    };
    let licenses: Vec<License> = {
        let pool = graph.all_licenses();
        pool.choose_multiple(rng, sample_size.min(pool.len()))
            .map(|l| (*l).clone())
            .collect()
    };

    let model_licenses = time_all(
        models
            .iter()
            .map(|m| runner.model_licenses(&m.id, &m.model_owner)),
    )
    .await?;
    let report = BenchReport::from_durations("model_licenses", &model_licenses);
    info!(name = report.name, mean_ms = report.mean_ms, std_dev_ms = report.std_dev_ms, "benchmark done");
    let mut reports = vec![report];

    let models_by_license = time_all(
        licenses
            .iter()
            .map(|l| runner.models_by_license(&l.id, &l.model_owner)),
    )
    .await?;
    let report = BenchReport::from_durations("models_by_license", &models_by_license);
    info!(name = report.name, mean_ms = report.mean_ms, std_dev_ms = report.std_dev_ms, "benchmark done");
    reports.push(report);

    let model_datasets = time_all(
        models
            .iter()
            .map(|m| runner.model_datasets(&m.id, &m.model_owner)),
    )
    .await?;
    let report = BenchReport::from_durations("model_datasets", &model_datasets);
    info!(name = report.name, mean_ms = report.mean_ms, std_dev_ms = report.std_dev_ms, "benchmark done");
    reports.push(report);

    Ok(reports)
}

/// Time a batch of independent traversal calls, all in flight concurrently.
async fn time_all<F>(calls: impl Iterator<Item = F>) -> Result<Vec<f64>, LedgerError>
where
    F: Future<Output = Result<(), LedgerError>>,
{
    let timed = calls.map(|call| async move {
        let start = Instant::now();
        call.await?;
        Ok(start.elapsed().as_secs_f64() * 1_000.0)
    });
    future::join_all(timed).await.into_iter().collect()
}
