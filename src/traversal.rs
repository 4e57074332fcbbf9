//! Read-path traversals.
//!
//! Each operation re-derives entity relationships purely by querying the
//! ledger (never the in-memory graph), so measured latency reflects real
//! read-path cost. Walks over the model chain carry an explicit visited set
//! and an iterative worklist; the generator never produces cycles, but a
//! malformed ledger answer must not hang the benchmark.

use crate::config::ErrorPolicy;
use crate::ledger::{LedgerApi, LedgerError};
use crate::types::{Dataset, License, LicenseId, Model, ModelId, Party, Template};
use serde::de::DeserializeOwned;
use std::collections::{HashSet, VecDeque};
use tracing::warn;

pub struct TraversalRunner<'a> {
    ledger: &'a dyn LedgerApi,
    policy: ErrorPolicy,
}

impl<'a> TraversalRunner<'a> {
    pub fn new(ledger: &'a dyn LedgerApi, policy: ErrorPolicy) -> Self {
        Self { ledger, policy }
    }

    /// Point query by id scoped to the reader party. Under the lenient
    /// policy a failed or empty fetch is logged and surfaces as `None`,
    /// terminating that branch of the traversal; strict mode aborts.
    async fn fetch<T: DeserializeOwned>(
        &self,
        template: Template,
        id: &str,
        reader: &Party,
    ) -> Result<Option<T>, LedgerError> {
        let outcome = match self.ledger.query_by_id(template, id, reader).await {
            Ok(Some(payload)) => serde_json::from_value(payload)
                .map(Some)
                .map_err(LedgerError::from),
            Ok(None) => Err(LedgerError::NotFound {
                template: template.id(),
                id: id.to_string(),
            }),
            Err(e) => Err(e),
        };

        match (outcome, self.policy) {
            (Ok(v), _) => Ok(v),
            (Err(e), ErrorPolicy::Strict) => Err(e),
            (Err(e), ErrorPolicy::Lenient) => {
                warn!(template = template.id(), id, error = %e, "fetch failed, skipping branch");
                Ok(None)
            }
        }
    }

    /// model → datasets → licenses, then repeat on the model's predecessor
    /// until the chain runs out.
    pub async fn model_licenses(
        &self,
        model_id: &ModelId,
        owner: &Party,
    ) -> Result<(), LedgerError> {
        let mut next = Some(model_id.clone());
        let mut visited: HashSet<ModelId> = HashSet::new();

        while let Some(id) = next.take() {
            if !visited.insert(id.clone()) {
                break;
            }
            let Some(model) = self.fetch::<Model>(Template::ModelMeta, &id.0, owner).await?
            else {
                break;
            };

            let mut datasets = Vec::with_capacity(model.dataset_list.len());
            for ds_id in &model.dataset_list {
                if let Some(ds) = self
                    .fetch::<Dataset>(Template::DatasetMeta, &ds_id.0, owner)
                    .await?
                {
                    datasets.push(ds);
                }
            }
            for ds in &datasets {
                let _ = self
                    .fetch::<License>(Template::License, &ds.license_id.0, owner)
                    .await?;
            }

            next = model.source_model;
        }
        Ok(())
    }

    /// license → datasets → models, then transitively over each model's
    /// successor list.
    pub async fn models_by_license(
        &self,
        license_id: &LicenseId,
        owner: &Party,
    ) -> Result<(), LedgerError> {
        let Some(license) = self
            .fetch::<License>(Template::License, &license_id.0, owner)
            .await?
        else {
            return Ok(());
        };

        let mut datasets = Vec::with_capacity(license.dataset_list.len());
        for ds_id in &license.dataset_list {
            if let Some(ds) = self
                .fetch::<Dataset>(Template::DatasetMeta, &ds_id.0, owner)
                .await?
            {
                datasets.push(ds);
            }
        }

        let mut work: VecDeque<ModelId> = datasets
            .iter()
            .flat_map(|ds| ds.model_list.iter().cloned())
            .collect();
        let mut visited: HashSet<ModelId> = HashSet::new();
        while let Some(model_id) = work.pop_front() {
            if !visited.insert(model_id.clone()) {
                continue;
            }
            let Some(model) = self
                .fetch::<Model>(Template::ModelMeta, &model_id.0, owner)
                .await?
            else {
                continue;
            };
            work.extend(model.child_models.iter().cloned());
        }
        Ok(())
    }

    /// model → datasets, then repeat on the model's predecessor.
    pub async fn model_datasets(
        &self,
        model_id: &ModelId,
        owner: &Party,
    ) -> Result<(), LedgerError> {
        let mut next = Some(model_id.clone());
        let mut visited: HashSet<ModelId> = HashSet::new();

        while let Some(id) = next.take() {
            if !visited.insert(id.clone()) {
                break;
            }
            let Some(model) = self.fetch::<Model>(Template::ModelMeta, &id.0, owner).await?
            else {
                break;
            };

            for ds_id in &model.dataset_list {
                let _ = self
                    .fetch::<Dataset>(Template::DatasetMeta, &ds_id.0, owner)
                    .await?;
            }

            next = model.source_model;
        }
        Ok(())
    }
}
