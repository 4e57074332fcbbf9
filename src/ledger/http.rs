use crate::ledger::{LedgerApi, LedgerError};
use crate::types::{Party, Template};
use anyhow::Context;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use url::Url;

/// reqwest-backed client for the ledger's HTTP JSON API. The bearer token is
/// attached to every request via a default header; the timeout applies per
/// request.
pub struct HttpLedger {
    client: reqwest::Client,
    readyz_url: Url,
    user_url: Url,
    create_url: Url,
    query_url: Url,
}

impl HttpLedger {
    pub fn new(base_url: &str, token: &str, timeout: Duration) -> anyhow::Result<Self> {
        let base = Url::parse(base_url).context("parse ledger base url")?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {token}"))
            .context("bearer token is not a valid header value")?;
        auth.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .context("build http client")?;

        Ok(Self {
            client,
            readyz_url: base.join("/readyz")?,
            user_url: base.join("/v1/user")?,
            create_url: base.join("/v1/create")?,
            query_url: base.join("/v1/query")?,
        })
    }

    async fn probe(&self, url: &Url) -> Result<String, LedgerError> {
        let resp = self.client.get(url.clone()).send().await?;
        Ok(resp.text().await?)
    }
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    result: Vec<QueryRow>,
}

#[derive(Debug, Deserialize)]
struct QueryRow {
    payload: serde_json::Value,
}

#[async_trait]
impl LedgerApi for HttpLedger {
    async fn readyz(&self) -> Result<String, LedgerError> {
        self.probe(&self.readyz_url).await
    }

    async fn user(&self) -> Result<String, LedgerError> {
        self.probe(&self.user_url).await
    }

    async fn create(
        &self,
        template: Template,
        payload: serde_json::Value,
    ) -> Result<(), LedgerError> {
        let resp = self
            .client
            .post(self.create_url.clone())
            .json(&json!({ "templateId": template.id(), "payload": payload }))
            .send()
            .await?;

        if resp.status().is_success() {
            return Ok(());
        }
        let body = resp.text().await.unwrap_or_default();
        Err(LedgerError::Application {
            template: template.id(),
            body,
        })
    }

    async fn query_by_id(
        &self,
        template: Template,
        id: &str,
        reader: &Party,
    ) -> Result<Option<serde_json::Value>, LedgerError> {
        let resp = self
            .client
            .post(self.query_url.clone())
            .json(&json!({
                "templateIds": [template.id()],
                "query": { "id": id },
                "readers": [reader.0],
            }))
            .send()
            .await?;

        if !resp.status().is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(LedgerError::Application {
                template: template.id(),
                body,
            });
        }

        let body: QueryResponse = resp.json().await?;
        Ok(body.result.into_iter().next().map(|row| row.payload))
    }
}
