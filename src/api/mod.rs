use crate::error::Result;
use crate::models::{TokenInfo, Transaction};
use async_trait::async_trait;

pub mod explorer;
pub mod types;

pub use explorer::ExplorerClient;

/// Source of live token data for the dashboard.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenDataSource: Send + Sync {
    async fn fetch_token_info(&self, token_id: &str) -> Result<TokenInfo>;

    /// Most recent transfers first, at most `size` of them.
    async fn fetch_transactions(&self, token_id: &str, size: usize) -> Result<Vec<Transaction>>;
}
