use serde::{Deserialize, Serialize};

/// A simulated tenant identity. Every generated entity is owned by exactly
/// one party; cross-party references never occur.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Party(pub String);

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LicenseId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DatasetId(pub String);

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ModelId(pub String);

/// The ledger's type tag selecting which schema a create/query call targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Template {
    License,
    DatasetMeta,
    ModelMeta,
}

impl Template {
    pub fn id(self) -> &'static str {
        match self {
            Template::License => "CRM:License",
            Template::DatasetMeta => "CRM:DatasetMeta",
            Template::ModelMeta => "CRM:ModelMeta",
        }
    }
}

/// License payload as the ledger contract expects it (camelCase wire names).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct License {
    pub id: LicenseId,
    pub scope: String,
    pub copyright_owner_id: String,
    pub model_owner: Party,
    pub type_id: String,
    pub dataset_list: Vec<DatasetId>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub id: DatasetId,
    pub source_url: String,
    pub copyright_owner_id: String,
    /// Back-reference to the license that contains this dataset.
    pub license_id: LicenseId,
    pub model_list: Vec<ModelId>,
    pub model_owner: Party,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub id: ModelId,
    pub model_owner: Party,
    pub dataset_list: Vec<DatasetId>,
    /// Predecessor in the per-party model chain; absent for the first model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_model: Option<ModelId>,
    /// Successors in the chain (at most one for generated graphs).
    pub child_models: Vec<ModelId>,
}
