use crate::models::{format_base_units, Transaction, TRANSACTION_VALUE_DECIMALS};

pub const HASH_PREFIX_LEN: usize = 8;
pub const ADDRESS_PREFIX_LEN: usize = 6;
pub const NO_TRANSACTIONS: &str = "No recent transactions found.";
pub const LOADING_TRANSACTIONS: &str = "Loading transactions...";

/// One formatted table row. `hash` keeps the full value for links and keys.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRow {
    pub hash: String,
    pub short_hash: String,
    pub from: String,
    pub to: String,
    pub value: String,
    pub explorer_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransactionsPanel {
    Loading,
    Empty,
    Rows(Vec<TransactionRow>),
}

impl TransactionsPanel {
    pub fn render_text(&self) -> String {
        match self {
            TransactionsPanel::Loading => LOADING_TRANSACTIONS.to_string(),
            TransactionsPanel::Empty => NO_TRANSACTIONS.to_string(),
            TransactionsPanel::Rows(rows) => {
                let mut out = format!("{:<12} {:<10} {:<10} {:>24}\n", "Hash", "From", "To", "Value");
                for row in rows {
                    out.push_str(&format!(
                        "{:<12} {:<10} {:<10} {:>24}\n",
                        row.short_hash, row.from, row.to, row.value
                    ));
                }
                out
            }
        }
    }
}

/// Formats transactions for display against a public explorer.
#[derive(Debug, Clone)]
pub struct TransactionView {
    explorer_web_url: String,
}

impl TransactionView {
    pub fn new(explorer_web_url: impl Into<String>) -> Self {
        Self {
            explorer_web_url: explorer_web_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn transaction_url(&self, hash: &str) -> String {
        format!("{}/transactions/{}", self.explorer_web_url, hash)
    }

    pub fn row(&self, tx: &Transaction) -> TransactionRow {
        TransactionRow {
            hash: tx.hash.clone(),
            short_hash: truncate(&tx.hash, HASH_PREFIX_LEN),
            from: truncate(&tx.sender, ADDRESS_PREFIX_LEN),
            to: truncate(&tx.receiver, ADDRESS_PREFIX_LEN),
            value: format_base_units(&tx.raw_value, TRANSACTION_VALUE_DECIMALS),
            explorer_url: self.transaction_url(&tx.hash),
        }
    }

    pub fn panel(&self, loading: bool, transactions: &[Transaction]) -> TransactionsPanel {
        if loading {
            TransactionsPanel::Loading
        } else if transactions.is_empty() {
            TransactionsPanel::Empty
        } else {
            TransactionsPanel::Rows(transactions.iter().map(|tx| self.row(tx)).collect())
        }
    }
}

/// First `len` characters followed by an ellipsis.
pub fn truncate(value: &str, len: usize) -> String {
    let prefix: String = value.chars().take(len).collect();
    format!("{}...", prefix)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tx(hash: &str, value: &str) -> Transaction {
        Transaction {
            hash: hash.to_string(),
            timestamp: 1_700_000_000,
            sender: "erd1qqqqqqqqqsender".to_string(),
            receiver: "erd1zzzzreceiver".to_string(),
            raw_value: value.to_string(),
        }
    }

    #[test]
    fn test_row_truncates_and_scales() {
        let view = TransactionView::new("https://explorer.multiversx.com/");
        let row = view.row(&tx("0123456789abcdef", "1500000000000000000"));
        assert_eq!(row.short_hash, "01234567...");
        assert_eq!(row.from, "erd1qq...");
        assert_eq!(row.to, "erd1zz...");
        assert_eq!(row.value, "1.5");
        assert_eq!(row.hash, "0123456789abcdef");
        assert_eq!(
            row.explorer_url,
            "https://explorer.multiversx.com/transactions/0123456789abcdef"
        );
    }

    #[test]
    fn test_truncate_is_char_safe() {
        assert_eq!(truncate("ab", 6), "ab...");
        assert_eq!(truncate("ééééééé", 6), "éééééé...");
    }

    #[test]
    fn test_panel_states() {
        let view = TransactionView::new("https://explorer.multiversx.com");
        assert_eq!(view.panel(true, &[tx("a", "1")]), TransactionsPanel::Loading);
        assert_eq!(view.panel(false, &[]), TransactionsPanel::Empty);
        assert_eq!(view.panel(false, &[]).render_text(), NO_TRANSACTIONS);

        let panel = view.panel(false, &[tx("aaaaaaaaaaaa", "1000000000000000000")]);
        match &panel {
            TransactionsPanel::Rows(rows) => assert_eq!(rows.len(), 1),
            other => panic!("expected rows, got {:?}", other),
        }
        assert!(panel.render_text().contains("aaaaaaaa..."));
    }
}
