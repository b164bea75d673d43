//! Error types for World Tree stores
//!
//! Analyzers never fail; only persistence writes can.

use thiserror::Error;

/// Failure while writing to a store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Serialization error: {message}")]
    Serialize { message: String },
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialize {
            message: err.to_string(),
        }
    }
}

impl StoreError {
    pub(crate) fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
