//! Unified error type for the price cache.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("getting price for {code} from source: {cause}")]
    SourceFetch { code: String, cause: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Wrap an underlying source failure for one item code.
    pub fn source_fetch(code: impl Into<String>, cause: impl std::fmt::Display) -> Self {
        Error::SourceFetch {
            code: code.into(),
            cause: cause.to_string(),
        }
    }
}
