pub mod token;

pub use token::{format_base_units, scale_base_units, TokenInfo, Transaction, TRANSACTION_VALUE_DECIMALS};
