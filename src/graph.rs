//! Synthetic relational graph generator.
//!
//! Builds the three-tier test graph (licenses ⊇ datasets ⊇ models) for each
//! party in a single deterministic pass. Cross-references are accumulated in
//! explicit adjacency maps keyed by index and materialized once at the end,
//! so no shared structure is mutated while entities are being constructed.

use crate::config::Dimensions;
use crate::types::{Dataset, DatasetId, License, LicenseId, Model, ModelId, Party};
use anyhow::{bail, Result};
use rand::distributions::Alphanumeric;
use rand::seq::index;
use rand::Rng;
use std::collections::BTreeMap;

const ID_TAG_LEN: usize = 10;

/// The fully linked in-memory graph, grouped per owning party.
#[derive(Clone, Debug, Default)]
pub struct TestGraph {
    pub parties: Vec<Party>,
    pub licenses: BTreeMap<Party, Vec<License>>,
    pub datasets: BTreeMap<Party, Vec<Dataset>>,
    pub models: BTreeMap<Party, Vec<Model>>,
}

impl TestGraph {
    /// All licenses flattened across parties, in party order.
    pub fn all_licenses(&self) -> Vec<&License> {
        self.parties
            .iter()
            .flat_map(|p| self.licenses[p].iter())
            .collect()
    }

    pub fn all_datasets(&self) -> Vec<&Dataset> {
        self.parties
            .iter()
            .flat_map(|p| self.datasets[p].iter())
            .collect()
    }

    pub fn all_models(&self) -> Vec<&Model> {
        self.parties
            .iter()
            .flat_map(|p| self.models[p].iter())
            .collect()
    }
}

/// Generate a test graph for the given dimensions.
///
/// Identifier collisions are not checked; uniqueness relies on the entropy of
/// the random tags. Sampling a model's datasets happens without replacement
/// over the party's full dataset range, so `datasets_per_model` greater than
/// `datasets_per_party` is a caller error and fails loudly.
pub fn generate<R: Rng>(dims: &Dimensions, namespace: &str, rng: &mut R) -> Result<TestGraph> {
    if dims.datasets_per_model > dims.datasets_per_party {
        bail!(
            "datasets_per_model ({}) exceeds datasets_per_party ({}); cannot sample without replacement",
            dims.datasets_per_model,
            dims.datasets_per_party
        );
    }
    if dims.datasets_per_party > 0 && dims.licenses_per_party == 0 {
        bail!("datasets require at least one license per party");
    }

    let parties: Vec<Party> = (0..dims.parties)
        .map(|i| Party(format!("Party{}::{namespace}", i + 1)))
        .collect();

    let mut graph = TestGraph {
        parties: parties.clone(),
        ..TestGraph::default()
    };

    for party in &parties {
        let license_ids: Vec<LicenseId> = (0..dims.licenses_per_party)
            .map(|_| LicenseId(format!("L:{}", rand_tag(rng))))
            .collect();

        // Datasets: pick an owning license uniformly; record the assignment
        // and the reverse edge in index-keyed adjacency.
        let mut datasets_of_license: Vec<Vec<DatasetId>> =
            vec![Vec::new(); dims.licenses_per_party];
        let mut dataset_ids: Vec<DatasetId> = Vec::with_capacity(dims.datasets_per_party);
        let mut license_of_dataset: Vec<usize> = Vec::with_capacity(dims.datasets_per_party);
        for _ in 0..dims.datasets_per_party {
            let ds_id = DatasetId(format!("DS:{}", rand_tag(rng)));
            let l_index = rng.gen_range(0..dims.licenses_per_party);
            datasets_of_license[l_index].push(ds_id.clone());
            dataset_ids.push(ds_id);
            license_of_dataset.push(l_index);
        }

        // Models: sample the dataset fan-in without replacement from the
        // party's full dataset range, then chain by index.
        let model_ids: Vec<ModelId> = (0..dims.models_per_party)
            .map(|i| ModelId(format!("M:{}:{i}", party.0)))
            .collect();
        let mut models_of_dataset: Vec<Vec<ModelId>> = vec![Vec::new(); dims.datasets_per_party];
        let mut datasets_of_model: Vec<Vec<DatasetId>> =
            Vec::with_capacity(dims.models_per_party);
        for model_id in &model_ids {
            let picks = index::sample(rng, dims.datasets_per_party, dims.datasets_per_model);
            let mut referenced = Vec::with_capacity(dims.datasets_per_model);
            for ds_index in picks.iter() {
                models_of_dataset[ds_index].push(model_id.clone());
                referenced.push(dataset_ids[ds_index].clone());
            }
            datasets_of_model.push(referenced);
        }

        // Materialize the entities from the adjacency.
        let licenses: Vec<License> = license_ids
            .iter()
            .zip(datasets_of_license)
            .map(|(id, dataset_list)| License {
                id: id.clone(),
                scope: "scope".to_string(),
                copyright_owner_id: "cro".to_string(),
                model_owner: party.clone(),
                type_id: "tid".to_string(),
                dataset_list,
            })
            .collect();

        let datasets: Vec<Dataset> = dataset_ids
            .iter()
            .zip(license_of_dataset)
            .zip(models_of_dataset)
            .map(|((id, l_index), model_list)| Dataset {
                id: id.clone(),
                source_url: "url".to_string(),
                copyright_owner_id: "cro".to_string(),
                license_id: license_ids[l_index].clone(),
                model_list,
                model_owner: party.clone(),
            })
            .collect();

        let models: Vec<Model> = model_ids
            .iter()
            .enumerate()
            .zip(datasets_of_model)
            .map(|((i, id), dataset_list)| Model {
                id: id.clone(),
                model_owner: party.clone(),
                dataset_list,
                source_model: (i > 0).then(|| model_ids[i - 1].clone()),
                child_models: if i + 1 < dims.models_per_party {
                    vec![model_ids[i + 1].clone()]
                } else {
                    Vec::new()
                },
            })
            .collect();

        graph.licenses.insert(party.clone(), licenses);
        graph.datasets.insert(party.clone(), datasets);
        graph.models.insert(party.clone(), models);
    }

    Ok(graph)
}

fn rand_tag<R: Rng>(rng: &mut R) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(ID_TAG_LEN)
        .map(char::from)
        .collect()
}
