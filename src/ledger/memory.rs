use crate::ledger::{LedgerApi, LedgerError};
use crate::types::{Party, Template};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// In-process ledger stand-in used by the integration tests.
///
/// Created payloads are retained keyed by `(template, id)` and served back to
/// point queries scoped to the owning party; per-template query counters make
/// traversal fetch counts observable.
#[derive(Default)]
pub struct MemoryLedger {
    records: Mutex<HashMap<(Template, String), serde_json::Value>>,
    query_counts: Mutex<HashMap<Template, u64>>,
    creates: AtomicU64,
    rejected_template: Mutex<Option<Template>>,
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Force every subsequent create for `template` to fail with an
    /// application error.
    pub fn reject_creates_for(&self, template: Template) {
        *self.rejected_template.lock().unwrap() = Some(template);
    }

    pub fn create_count(&self) -> u64 {
        self.creates.load(Ordering::Relaxed)
    }

    pub fn query_count(&self, template: Template) -> u64 {
        self.query_counts
            .lock()
            .unwrap()
            .get(&template)
            .copied()
            .unwrap_or(0)
    }

    pub fn total_queries(&self) -> u64 {
        self.query_counts.lock().unwrap().values().sum()
    }

    pub fn reset_query_counts(&self) {
        self.query_counts.lock().unwrap().clear();
    }
}

#[async_trait]
impl LedgerApi for MemoryLedger {
    async fn readyz(&self) -> Result<String, LedgerError> {
        Ok("readyz check passed".to_string())
    }

    async fn user(&self) -> Result<String, LedgerError> {
        Ok(format!("{{\"userId\":\"{}\"}}", crate::auth::TEST_SUBJECT))
    }

    async fn create(
        &self,
        template: Template,
        payload: serde_json::Value,
    ) -> Result<(), LedgerError> {
        if *self.rejected_template.lock().unwrap() == Some(template) {
            return Err(LedgerError::Application {
                template: template.id(),
                body: "create rejected by test ledger".to_string(),
            });
        }

        let id = payload
            .get("id")
            .and_then(|v| v.as_str())
            .ok_or_else(|| LedgerError::Application {
                template: template.id(),
                body: "payload missing id field".to_string(),
            })?
            .to_string();

        self.records
            .lock()
            .unwrap()
            .insert((template, id), payload);
        self.creates.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn query_by_id(
        &self,
        template: Template,
        id: &str,
        reader: &Party,
    ) -> Result<Option<serde_json::Value>, LedgerError> {
        *self
            .query_counts
            .lock()
            .unwrap()
            .entry(template)
            .or_insert(0) += 1;

        let records = self.records.lock().unwrap();
        let found = records
            .get(&(template, id.to_string()))
            .filter(|payload| {
                payload
                    .get("modelOwner")
                    .and_then(|v| v.as_str())
                    .is_some_and(|owner| owner == reader.0)
            })
            .cloned();
        Ok(found)
    }
}
