use crate::api::types::{normalize_token_info, normalize_transactions};
use crate::api::TokenDataSource;
use crate::config::ExplorerConfig;
use crate::error::{Error, Result};
use crate::models::{TokenInfo, Transaction};
use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

/// HTTP client for the public explorer REST API.
#[derive(Debug, Clone)]
pub struct ExplorerClient {
    client: Client,
    base_url: String,
}

impl ExplorerClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ExplorerConfig) -> Result<Self> {
        Self::new(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token_url(&self, token_id: &str) -> String {
        format!("{}/tokens/{}", self.base_url, token_id)
    }

    pub fn transactions_url(&self, token_id: &str, size: usize) -> String {
        format!("{}/transactions?token={}&size={}", self.base_url, token_id, size)
    }

    /// GETs `url` and decodes a JSON body. `what` names the resource in error messages.
    async fn get_json(&self, url: &str, what: &str) -> Result<Value> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            error!("Request for {} failed: {}", what, e);
            Error::FetchError(format!("Failed to fetch {}: {}", what, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("Explorer returned {} for {}", status, what);
            return Err(Error::FetchError(format!(
                "Failed to fetch {} (HTTP {})",
                what,
                status.as_u16()
            )));
        }

        let body = response.text().await.map_err(|e| {
            error!("Failed to read {} body: {}", what, e);
            Error::FetchError(format!("Failed to read {} response: {}", what, e))
        })?;

        serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse {} response: {}", what, e);
            Error::ParseError(format!("Failed to parse {} response: {}", what, e))
        })
    }
}

#[async_trait]
impl TokenDataSource for ExplorerClient {
    async fn fetch_token_info(&self, token_id: &str) -> Result<TokenInfo> {
        let body = self.get_json(&self.token_url(token_id), "token info").await?;
        let info = normalize_token_info(body)?;
        info!("Fetched token info for {} (price ${})", info.identifier, info.price_usd);
        Ok(info)
    }

    async fn fetch_transactions(&self, token_id: &str, size: usize) -> Result<Vec<Transaction>> {
        let body = self
            .get_json(&self.transactions_url(token_id, size), "transactions")
            .await?;
        let mut transactions = normalize_transactions(body)?;
        transactions.truncate(size);
        info!("Fetched {} transactions for {}", transactions.len(), token_id);
        Ok(transactions)
    }
}
