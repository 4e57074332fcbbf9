use serde::{Deserialize, Serialize};

/// Graph dimensions: `n` parties, each owning `l` licenses, `d` datasets and
/// `m` chained models, with each model consuming `t` distinct datasets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dimensions {
    pub parties: usize,
    pub licenses_per_party: usize,
    pub datasets_per_party: usize,
    pub models_per_party: usize,
    /// Dataset fan-in per model, sampled without replacement from the
    /// party's datasets. Must not exceed `datasets_per_party`.
    pub datasets_per_model: usize,
}

impl Default for Dimensions {
    fn default() -> Self {
        Self {
            parties: 10,
            licenses_per_party: 10,
            datasets_per_party: 10,
            models_per_party: 1,
            datasets_per_model: 10,
        }
    }
}

impl Dimensions {
    pub fn total_licenses(&self) -> usize {
        self.parties * self.licenses_per_party
    }

    pub fn total_datasets(&self) -> usize {
        self.parties * self.datasets_per_party
    }

    pub fn total_models(&self) -> usize {
        self.parties * self.models_per_party
    }
}

/// How create requests are issued within one entity kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WriteMode {
    /// All creates for a kind in flight at once, awaited as a barrier.
    FanOut,
    /// One create at a time (bounded concurrency of 1).
    Sequential,
}

/// What to do when a ledger call fails or a query returns no rows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorPolicy {
    /// Log the failure and continue with the remaining work (parity with the
    /// original benchmark runs).
    Lenient,
    /// Abort the write batch or traversal on the first failure.
    Strict,
}
