use crate::traits::ProviderKind;

/// Error type for usage-sampler operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("{provider} query failed: {message}")]
    ProviderQuery { provider: ProviderKind, message: String },

    #[error("Malformed record at row {row}: {message}")]
    MalformedRecord { row: usize, message: String },

    #[error("Persistence error: {0}")]
    Persistence(#[from] rusqlite::Error),

    #[error("Interchange error: {0}")]
    Interchange(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Scheduler error: {0}")]
    Scheduler(String),
}

impl Error {
    pub(crate) fn provider_unavailable<S: Into<String>>(msg: S) -> Self {
        Error::ProviderUnavailable(msg.into())
    }

    pub(crate) fn provider_query<S: Into<String>>(provider: ProviderKind, msg: S) -> Self {
        Error::ProviderQuery { provider, message: msg.into() }
    }

    pub(crate) fn malformed_record<S: Into<String>>(row: usize, msg: S) -> Self {
        Error::MalformedRecord { row, message: msg.into() }
    }

    pub(crate) fn interchange<S: Into<String>>(msg: S) -> Self {
        Error::Interchange(msg.into())
    }

    pub(crate) fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Error::InvalidConfig(msg.into())
    }

    pub(crate) fn scheduler<S: Into<String>>(msg: S) -> Self {
        Error::Scheduler(msg.into())
    }

    /// Whether this error only affects a single transition and left pipeline state untouched
    pub fn is_malformed_record(&self) -> bool {
        matches!(self, Error::MalformedRecord { .. })
    }
}

/// Result type for usage-sampler operations
pub type Result<T> = std::result::Result<T, Error>;
