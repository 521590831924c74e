//! Configuration errors

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading, validating or writing the site configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file {path:?} not found or unreadable: {source}")]
    NotFoundOrUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("config file {path:?} is malformed: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: missing or empty field `{0}`")]
    MissingField(&'static str),

    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("failed to write config file {path:?}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ConfigError::InvalidConfiguration(message.into())
    }

    /// The persisted document could not be read or parsed
    pub fn is_read_error(&self) -> bool {
        matches!(
            self,
            ConfigError::NotFoundOrUnreadable { .. } | ConfigError::Malformed { .. }
        )
    }

    /// A candidate document was rejected before anything was written
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            ConfigError::MissingField(_) | ConfigError::InvalidConfiguration(_)
        )
    }
}
