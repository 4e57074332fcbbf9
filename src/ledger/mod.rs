use crate::types::{Party, Template};
use async_trait::async_trait;
use thiserror::Error;

pub mod http;
pub mod memory;

pub use http::HttpLedger;
pub use memory::MemoryLedger;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The ledger accepted the request but rejected the operation; the
    /// response body is carried verbatim.
    #[error("{template} request rejected by ledger: {body}")]
    Application { template: &'static str, body: String },

    /// A point query returned zero rows (raised in strict mode only).
    #[error("no {template} record with id {id}")]
    NotFound { template: &'static str, id: String },

    #[error("malformed ledger payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// The fixed REST contract of the external ledger service. The bot never
/// implements the ledger itself; everything behind this trait is a remote
/// collaborator (or an in-process stand-in for tests).
#[async_trait]
pub trait LedgerApi: Send + Sync {
    /// GET /readyz — liveness probe; the body is returned for logging.
    async fn readyz(&self) -> Result<String, LedgerError>;

    /// GET /v1/user — identity probe; the body is returned for logging.
    async fn user(&self) -> Result<String, LedgerError>;

    /// POST /v1/create with `{ templateId, payload }`.
    async fn create(
        &self,
        template: Template,
        payload: serde_json::Value,
    ) -> Result<(), LedgerError>;

    /// POST /v1/query with a field-equality filter on `id`, scoped to one
    /// reader party. Returns the first matching payload, or `None` when the
    /// query matched nothing.
    async fn query_by_id(
        &self,
        template: Template,
        id: &str,
        reader: &Party,
    ) -> Result<Option<serde_json::Value>, LedgerError>;
}
