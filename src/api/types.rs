//! Raw explorer payloads and their normalization into [`TokenInfo`] and [`Transaction`].
//!
//! The explorer is loose about types: numbers arrive as JSON numbers or as
//! strings, optional blocks go missing, and the transaction hash has two names.
//! Everything here is pure so it can be tested without a network.

use crate::error::{Error, Result};
use crate::models::{TokenInfo, Transaction};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTokenInfo {
    pub name: Option<String>,
    pub identifier: Option<String>,
    pub price: Option<RawPrice>,
    pub market_cap: Option<Value>,
    pub supply: Option<Value>,
    pub circulating_supply: Option<Value>,
    pub holders: Option<Value>,
    pub decimals: Option<Value>,
    pub assets: Option<RawAssets>,
    pub website: Option<String>,
    pub description: Option<String>,
}

/// `price` is documented as `{ "usd": ... }` but is also seen as a bare number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawPrice {
    Quoted { usd: Option<Value> },
    Plain(Value),
}

#[derive(Debug, Default, Deserialize)]
pub struct RawAssets {
    pub avatar: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    pub tx_hash: Option<String>,
    pub hash: Option<String>,
    pub timestamp: Option<Value>,
    pub sender: Option<String>,
    pub receiver: Option<String>,
    pub value: Option<Value>,
}

impl RawPrice {
    fn usd(&self) -> Option<f64> {
        match self {
            RawPrice::Quoted { usd } => usd.as_ref().and_then(value_as_f64),
            RawPrice::Plain(value) => value_as_f64(value),
        }
    }
}

impl TryFrom<RawTokenInfo> for TokenInfo {
    type Error = Error;

    fn try_from(raw: RawTokenInfo) -> Result<TokenInfo> {
        let name = required_text(raw.name, "name")?;
        let identifier = required_text(raw.identifier, "identifier")?;

        let decimals = match raw.decimals.as_ref() {
            None | Some(Value::Null) => 0,
            Some(value) => value_as_u128(value)
                .and_then(|d| u32::try_from(d).ok())
                .ok_or_else(|| Error::ParseError(format!("Invalid decimals for {}: {}", identifier, value)))?,
        };

        let info = TokenInfo {
            price_usd: raw.price.as_ref().and_then(RawPrice::usd).unwrap_or(0.0),
            market_cap_usd: raw.market_cap.as_ref().and_then(value_as_f64).unwrap_or(0.0),
            raw_supply: optional_integer(raw.supply.as_ref(), "supply")?,
            raw_circulating_supply: optional_integer(raw.circulating_supply.as_ref(), "circulatingSupply")?,
            decimals,
            holder_count: optional_integer(raw.holders.as_ref(), "holders")?
                .try_into()
                .unwrap_or(u64::MAX),
            avatar_url: raw
                .assets
                .and_then(|assets| assets.avatar)
                .filter(|url| !url.trim().is_empty()),
            website: raw.website.unwrap_or_default(),
            description: raw.description.unwrap_or_default(),
            name,
            identifier,
        };

        debug!(
            "Normalized token {} - price: {:.8}, market cap: {:.2}, holders: {}",
            info.identifier, info.price_usd, info.market_cap_usd, info.holder_count
        );
        Ok(info)
    }
}

impl RawTransaction {
    /// `txHash` wins over `hash`; empty strings count as missing.
    pub fn pick_hash(&self) -> Option<String> {
        [&self.tx_hash, &self.hash]
            .into_iter()
            .flatten()
            .map(|h| h.trim())
            .find(|h| !h.is_empty())
            .map(str::to_string)
    }

    pub fn into_transaction(self) -> Option<Transaction> {
        let hash = self.pick_hash()?;
        let raw_value = match self.value {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            _ => "0".to_string(),
        };
        Some(Transaction {
            hash,
            timestamp: self.timestamp.as_ref().and_then(value_as_i64).unwrap_or(0),
            sender: self.sender.unwrap_or_default(),
            receiver: self.receiver.unwrap_or_default(),
            raw_value,
        })
    }
}

pub fn normalize_token_info(body: Value) -> Result<TokenInfo> {
    if !body.is_object() {
        return Err(Error::ParseError("Token info response is not a JSON object".to_string()));
    }
    let raw: RawTokenInfo = serde_json::from_value(body)?;
    TokenInfo::try_from(raw)
}

/// Anything but an array is a parse error; malformed elements are dropped.
pub fn normalize_transactions(body: Value) -> Result<Vec<Transaction>> {
    let items = match body {
        Value::Array(items) => items,
        other => {
            return Err(Error::ParseError(format!(
                "Expected a JSON array of transactions, got {}",
                json_kind(&other)
            )))
        }
    };

    let total = items.len();
    let transactions: Vec<Transaction> = items
        .into_iter()
        .enumerate()
        .filter_map(|(i, item)| match serde_json::from_value::<RawTransaction>(item) {
            Ok(raw) => {
                let tx = raw.into_transaction();
                if tx.is_none() {
                    warn!("Dropping transaction #{}: no txHash or hash", i);
                }
                tx
            }
            Err(e) => {
                warn!("Dropping malformed transaction #{}: {}", i, e);
                None
            }
        })
        .collect();

    debug!("Normalized {} of {} transactions", transactions.len(), total);
    Ok(transactions)
}

fn required_text(value: Option<String>, field: &str) -> Result<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::ParseError(format!("Missing required field '{}'", field)))
}

fn optional_integer(value: Option<&Value>, field: &str) -> Result<u128> {
    match value {
        None | Some(Value::Null) => Ok(0),
        Some(v) => value_as_u128(v)
            .ok_or_else(|| Error::ParseError(format!("Field '{}' is not a non-negative integer: {}", field, v))),
    }
}

fn value_as_f64(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

fn value_as_u128(value: &Value) -> Option<u128> {
    match value {
        Value::Number(n) => n.as_u64().map(u128::from).or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u128)
        }),
        Value::String(s) => s.trim().parse::<u128>().ok(),
        _ => None,
    }
}

fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
