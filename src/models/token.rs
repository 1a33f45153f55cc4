use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transfers are always reported in 18-decimal base units.
pub const TRANSACTION_VALUE_DECIMALS: u32 = 18;

/// Price used when the explorer reports no usable price.
pub const FALLBACK_PRICE_USD: f64 = 0.1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub name: String,
    pub identifier: String,
    pub price_usd: f64,
    pub market_cap_usd: f64,
    pub raw_supply: u128,
    pub raw_circulating_supply: u128,
    pub decimals: u32,
    pub holder_count: u64,
    pub avatar_url: Option<String>,
    pub website: String,
    pub description: String,
}

impl TokenInfo {
    pub fn display_supply(&self) -> Option<Decimal> {
        scale_base_units(self.raw_supply, self.decimals)
    }

    pub fn display_circulating_supply(&self) -> Option<Decimal> {
        scale_base_units(self.raw_circulating_supply, self.decimals)
    }

    /// Live price, or the fallback when the reported one is zero or unusable.
    pub fn effective_price(&self) -> f64 {
        if self.price_usd.is_finite() && self.price_usd > 0.0 {
            self.price_usd
        } else {
            FALLBACK_PRICE_USD
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub hash: String,
    pub timestamp: i64,
    pub sender: String,
    pub receiver: String,
    /// Base-unit amount exactly as the explorer sent it.
    pub raw_value: String,
}

impl Transaction {
    pub fn display_value(&self) -> Option<Decimal> {
        let raw = self.raw_value.trim().parse::<u128>().ok()?;
        scale_base_units(raw, TRANSACTION_VALUE_DECIMALS)
    }

    pub fn timestamp_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

/// Exact `raw / 10^decimals`, or `None` when the result does not fit a `Decimal`.
pub fn scale_base_units(raw: u128, decimals: u32) -> Option<Decimal> {
    let value = i128::try_from(raw).ok()?;
    Decimal::try_from_i128_with_scale(value, decimals)
        .ok()
        .map(|d| d.normalize())
}

/// Human-readable base-unit amount; falls back to `f64` precision for huge values.
pub fn format_base_units(raw: &str, decimals: u32) -> String {
    let raw = raw.trim();
    match raw.parse::<u128>() {
        Ok(value) => match scale_base_units(value, decimals) {
            Some(scaled) => scaled.to_string(),
            None => (value as f64 / 10f64.powi(decimals as i32)).to_string(),
        },
        Err(_) => match raw.parse::<f64>() {
            Ok(value) if value.is_finite() => (value / 10f64.powi(decimals as i32)).to_string(),
            _ => "0".to_string(),
        },
    }
}
