use crate::models::TokenInfo;

const PRICE_FRACTION_DIGITS: usize = 6;
const MARKET_CAP_FRACTION_DIGITS: usize = 3;

/// Display-ready token summary.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenPanel {
    pub name: String,
    pub identifier: String,
    pub avatar_url: Option<String>,
    pub price: String,
    pub market_cap: String,
    pub total_supply: String,
    pub circulating_supply: String,
    pub holders: String,
    pub website: String,
    pub description: String,
    pub explorer_url: String,
}

impl TokenPanel {
    pub fn new(info: &TokenInfo, explorer_web_url: &str) -> Self {
        let scaled_or_raw = |scaled: Option<rust_decimal::Decimal>, raw: u128| {
            scaled
                .map(|d| d.to_string())
                .unwrap_or_else(|| (raw as f64 / 10f64.powi(info.decimals as i32)).to_string())
        };

        Self {
            name: info.name.clone(),
            identifier: info.identifier.clone(),
            avatar_url: info.avatar_url.clone(),
            price: format!("${}", format_grouped(info.effective_price(), PRICE_FRACTION_DIGITS)),
            market_cap: format!("${}", format_grouped(info.market_cap_usd, MARKET_CAP_FRACTION_DIGITS)),
            total_supply: scaled_or_raw(info.display_supply(), info.raw_supply),
            circulating_supply: scaled_or_raw(info.display_circulating_supply(), info.raw_circulating_supply),
            holders: info.holder_count.to_string(),
            website: info.website.clone(),
            description: info.description.clone(),
            explorer_url: format!(
                "{}/tokens/{}",
                explorer_web_url.trim_end_matches('/'),
                info.identifier
            ),
        }
    }

    pub fn render_text(&self) -> String {
        let mut out = format!("{} ({})\n", self.name, self.identifier);
        out.push_str(&format!("  Price:              {}\n", self.price));
        out.push_str(&format!("  Market Cap:         {}\n", self.market_cap));
        out.push_str(&format!("  Total Supply:       {}\n", self.total_supply));
        out.push_str(&format!("  Circulating Supply: {}\n", self.circulating_supply));
        out.push_str(&format!("  Holders:            {}\n", self.holders));
        if !self.website.is_empty() {
            out.push_str(&format!("  Website:            {}\n", self.website));
        }
        if !self.description.is_empty() {
            out.push_str(&format!("\n{}\n", self.description));
        }
        out.push_str(&format!("\nView on explorer: {}\n", self.explorer_url));
        out
    }
}

/// Rounds to at most `max_fraction` digits, drops trailing zeros and groups thousands.
pub fn format_grouped(value: f64, max_fraction: usize) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let fixed = format!("{:.*}", max_fraction, value.abs());
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, f.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, frac_part)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> TokenInfo {
        TokenInfo {
            name: "TRO".to_string(),
            identifier: "TRO-94c925".to_string(),
            price_usd: 0.012345678,
            market_cap_usd: 1_234_567.891_2,
            raw_supply: 21_000_000_000_000,
            raw_circulating_supply: 20_000_000_000_000,
            decimals: 6,
            holder_count: 987,
            avatar_url: Some("https://media.example/tro.png".to_string()),
            website: "https://xartists.example".to_string(),
            description: "Governance token".to_string(),
        }
    }

    #[test]
    fn test_format_grouped() {
        assert_eq!(format_grouped(1_234_567.891_2, 3), "1,234,567.891");
        assert_eq!(format_grouped(0.012345678, 6), "0.012346");
        assert_eq!(format_grouped(100.0, 6), "100");
        assert_eq!(format_grouped(999.0, 0), "999");
        assert_eq!(format_grouped(-1500.5, 2), "-1,500.5");
        assert_eq!(format_grouped(f64::NAN, 2), "0");
    }

    #[test]
    fn test_panel_fields() {
        let panel = TokenPanel::new(&info(), "https://explorer.multiversx.com/");
        assert_eq!(panel.price, "$0.012346");
        assert_eq!(panel.market_cap, "$1,234,567.891");
        assert_eq!(panel.total_supply, "21000000");
        assert_eq!(panel.circulating_supply, "20000000");
        assert_eq!(panel.holders, "987");
        assert_eq!(panel.explorer_url, "https://explorer.multiversx.com/tokens/TRO-94c925");
        assert!(panel.render_text().contains("Holders:            987"));
    }

    #[test]
    fn test_zero_price_uses_fallback() {
        let mut info = info();
        info.price_usd = 0.0;
        assert_eq!(TokenPanel::new(&info, "https://x").price, "$0.1");
    }
}
