use std::io;
use std::result::Result as StdResult;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Fetch error: {0}")]
    FetchError(String),
    #[error("Parse error: {0}")]
    ParseError(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl Error {
    /// True for failures of the explorer round trip (transport, status or body).
    pub fn is_fetch_failure(&self) -> bool {
        matches!(self, Error::FetchError(_) | Error::ParseError(_))
    }

    /// Message suitable for an inline error banner.
    pub fn user_message(&self) -> String {
        match self {
            Error::FetchError(msg) | Error::ParseError(msg) | Error::ValidationError(msg) => msg.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::FetchError(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::ParseError(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::ConfigError(err.to_string())
    }
}

pub type Result<T> = StdResult<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failure_classification() {
        assert!(Error::FetchError("down".into()).is_fetch_failure());
        assert!(Error::ParseError("bad json".into()).is_fetch_failure());
        assert!(!Error::ValidationError("nope".into()).is_fetch_failure());
        assert!(!Error::ConfigError("nope".into()).is_fetch_failure());
    }

    #[test]
    fn test_user_message_strips_prefix() {
        let err = Error::FetchError("Failed to fetch token info".into());
        assert_eq!(err.user_message(), "Failed to fetch token info");
        assert_eq!(err.to_string(), "Fetch error: Failed to fetch token info");

        let err = Error::ValidationError("This NFT is already staked.".into());
        assert_eq!(err.to_string(), "This NFT is already staked.");
    }

    #[test]
    fn test_serde_json_error_maps_to_parse_error() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err().into();
        assert!(matches!(err, Error::ParseError(_)));
    }
}
