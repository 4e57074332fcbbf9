//! Ledger write replay.
//!
//! Flattens the generated per-party maps into one ordered sequence per entity
//! kind and issues a create per entity. Kind order is fixed — datasets, then
//! licenses, then models — because model payloads reference dataset ids that
//! must already exist as domain facts. Failed creates never roll back or
//! abort earlier writes; the lenient policy also continues past them.

use crate::config::{ErrorPolicy, WriteMode};
use crate::graph::TestGraph;
use crate::ledger::LedgerApi;
use crate::types::Template;
use anyhow::Result;
use futures_util::future;
use serde::Serialize;
use tracing::{debug, warn};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReplayOutcome {
    pub attempted: usize,
    pub failed: usize,
}

/// Write the whole graph to the ledger under the given concurrency mode and
/// error policy. Returns per-run totals; under `ErrorPolicy::Strict` the
/// first failed create aborts the remaining batch.
pub async fn write_graph(
    ledger: &dyn LedgerApi,
    graph: &TestGraph,
    mode: WriteMode,
    policy: ErrorPolicy,
) -> Result<ReplayOutcome> {
    let mut outcome = ReplayOutcome::default();

    write_kind(ledger, Template::DatasetMeta, &graph.all_datasets(), mode, policy, &mut outcome)
        .await?;
    write_kind(ledger, Template::License, &graph.all_licenses(), mode, policy, &mut outcome)
        .await?;
    write_kind(ledger, Template::ModelMeta, &graph.all_models(), mode, policy, &mut outcome)
        .await?;

    debug!(
        attempted = outcome.attempted,
        failed = outcome.failed,
        "write replay finished"
    );
    Ok(outcome)
}

async fn write_kind<T: Serialize>(
    ledger: &dyn LedgerApi,
    template: Template,
    entities: &[&T],
    mode: WriteMode,
    policy: ErrorPolicy,
    outcome: &mut ReplayOutcome,
) -> Result<()> {
    let payloads = entities
        .iter()
        .map(|e| serde_json::to_value(e))
        .collect::<Result<Vec<_>, _>>()?;

    match mode {
        WriteMode::Sequential => {
            for payload in payloads {
                outcome.attempted += 1;
                if let Err(e) = ledger.create(template, payload).await {
                    outcome.failed += 1;
                    match policy {
                        ErrorPolicy::Strict => return Err(e.into()),
                        ErrorPolicy::Lenient => {
                            warn!(template = template.id(), error = %e, "create failed")
                        }
                    }
                }
            }
        }
        WriteMode::FanOut => {
            let creates = payloads
                .into_iter()
                .map(|payload| ledger.create(template, payload));
            // Barrier: everything is in flight before any result is taken.
            for result in future::join_all(creates).await {
                outcome.attempted += 1;
                if let Err(e) = result {
                    outcome.failed += 1;
                    match policy {
                        ErrorPolicy::Strict => return Err(e.into()),
                        ErrorPolicy::Lenient => {
                            warn!(template = template.id(), error = %e, "create failed")
                        }
                    }
                }
            }
        }
    }

    Ok(())
}
