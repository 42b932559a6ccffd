use thiserror::Error;

#[derive(Error, Debug)]
pub enum BitesError {
    #[error("Storage unavailable for key {key}: {source}")]
    StorageUnavailable {
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Stored data under key {key} could not be decoded: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Stored data under key {key} changed since it was read; reload and try again")]
    Conflict { key: String },

    #[error("Restaurant not found: {0}")]
    RecordNotFound(String),

    #[error("Place lookup failed: {0}")]
    LookupFailed(String),

    #[error("Place not found: {0}")]
    PlaceNotFound(String),

    #[error("{0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),

    #[error("Configuration error: {0}")]
    Config(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<figment::Error> for BitesError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl BitesError {
    pub fn storage(key: impl Into<String>, source: std::io::Error) -> Self {
        Self::StorageUnavailable {
            key: key.into(),
            source,
        }
    }

    pub fn lookup(message: impl Into<String>) -> Self {
        Self::LookupFailed(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Lookup and storage failures leave previous state intact and can be
    /// shown as a notice; the rest indicate bad input or data.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::StorageUnavailable { .. }
                | Self::Conflict { .. }
                | Self::LookupFailed(_)
                | Self::PlaceNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, BitesError>;
