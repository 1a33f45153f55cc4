#![allow(dead_code)]

use async_trait::async_trait;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tro_dashboard::api::TokenDataSource;
use tro_dashboard::config::Config;
use tro_dashboard::error::{Error, Result};
use tro_dashboard::models::{TokenInfo, Transaction};

pub const TOKEN_ID: &str = "TRO-94c925";

pub fn tro_info(price: f64) -> TokenInfo {
    TokenInfo {
        name: "TRO".to_string(),
        identifier: TOKEN_ID.to_string(),
        price_usd: price,
        market_cap_usd: 120_000.0,
        raw_supply: 21_000_000_000_000_000_000_000_000,
        raw_circulating_supply: 20_000_000_000_000_000_000_000_000,
        decimals: 18,
        holder_count: 321,
        avatar_url: None,
        website: String::new(),
        description: String::new(),
    }
}

pub fn transaction(hash: &str, raw_value: &str) -> Transaction {
    Transaction {
        hash: hash.to_string(),
        timestamp: 1_700_000_000,
        sender: "erd1senderaddress".to_string(),
        receiver: "erd1receiveraddress".to_string(),
        raw_value: raw_value.to_string(),
    }
}

/// Canned data source. `Err` strings become fetch errors.
#[derive(Debug, Clone)]
pub struct FakeSource {
    pub token: std::result::Result<TokenInfo, String>,
    pub transactions: std::result::Result<Vec<Transaction>, String>,
    pub token_delay: Duration,
    pub transactions_delay: Duration,
}

impl FakeSource {
    pub fn healthy(price: f64, transactions: Vec<Transaction>) -> Self {
        Self {
            token: Ok(tro_info(price)),
            transactions: Ok(transactions),
            token_delay: Duration::ZERO,
            transactions_delay: Duration::ZERO,
        }
    }

    pub fn with_delay(self, delay: Duration) -> Self {
        self.with_delays(delay, delay)
    }

    pub fn with_delays(mut self, token_delay: Duration, transactions_delay: Duration) -> Self {
        self.token_delay = token_delay;
        self.transactions_delay = transactions_delay;
        self
    }
}

#[async_trait]
impl TokenDataSource for FakeSource {
    async fn fetch_token_info(&self, _token_id: &str) -> Result<TokenInfo> {
        tokio::time::sleep(self.token_delay).await;
        self.token.clone().map_err(Error::FetchError)
    }

    async fn fetch_transactions(&self, _token_id: &str, _size: usize) -> Result<Vec<Transaction>> {
        tokio::time::sleep(self.transactions_delay).await;
        self.transactions.clone().map_err(Error::FetchError)
    }
}

/// One canned HTTP response, chosen by request path prefix.
#[derive(Debug, Clone)]
pub struct Route {
    pub path_prefix: &'static str,
    pub status: u16,
    pub body: String,
}

impl Route {
    pub fn new(path_prefix: &'static str, status: u16, body: impl Into<String>) -> Self {
        Self {
            path_prefix,
            status,
            body: body.into(),
        }
    }
}

/// Serves `routes` on an ephemeral local port until the test runtime shuts down.
/// Returns the base URL.
pub async fn serve(routes: Vec<Route>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        loop {
            let (mut socket, _) = match listener.accept().await {
                Ok(conn) => conn,
                Err(_) => return,
            };
            let routes = routes.clone();
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match socket.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }
                let request = String::from_utf8_lossy(&buf);
                let path = request.split_whitespace().nth(1).unwrap_or("/").to_string();

                let (status, body) = routes
                    .iter()
                    .find(|r| path.starts_with(r.path_prefix))
                    .map(|r| (r.status, r.body.clone()))
                    .unwrap_or((404, "{}".to_string()));

                let response = format!(
                    "HTTP/1.1 {} Canned\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            });
        }
    });

    format!("http://{}", addr)
}

pub fn config_for(api_base_url: &str) -> Config {
    let mut config = Config::default();
    config.explorer.api_base_url = api_base_url.to_string();
    config.explorer.request_timeout_secs = 5;
    config
}
