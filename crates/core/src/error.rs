//! Error types for the entity-row codec
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait implementations.
//!
//! All three kinds are terminal for the current call: the codec performs no
//! internal retry and no partial-result suppression. Absence of a row is
//! never an error.

use crate::traits::StoreError;
use crate::types::RowKey;
use thiserror::Error;

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the entity-row codec
#[derive(Debug, Error)]
pub enum Error {
    /// Underlying storage read or write failed (network, protocol, or
    /// cluster-side). Not retried; aborts the whole batch.
    #[error("storage call failed for key {key} in table {table}: {source}")]
    StorageIo {
        /// Table (column family) the call targeted
        table: String,
        /// Row key the call targeted
        key: RowKey,
        /// Storage-client failure
        #[source]
        source: StoreError,
    },

    /// Entity metadata is inconsistent with the resolved row shape, or a
    /// read reply contradicts it (malformed envelope, counter payload in a
    /// plain row, and the like).
    #[error("metadata error for table {table}: {reason}")]
    Metadata {
        /// Table (column family) named by the metadata
        table: String,
        /// What was inconsistent
        reason: String,
    },

    /// Row key cannot be converted to the store-native key form
    #[error("cannot encode row key {key}: {reason}")]
    KeyEncoding {
        /// The offending key
        key: RowKey,
        /// Why encoding failed
        reason: String,
    },
}

impl Error {
    /// Build a `Metadata` error for the given table
    pub fn metadata(table: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Metadata {
            table: table.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_storage_io() {
        let err = Error::StorageIo {
            table: "users".to_string(),
            key: RowKey::text("u1"),
            source: StoreError::new("connection reset"),
        };
        let msg = err.to_string();
        assert!(msg.contains("storage call failed"));
        assert!(msg.contains("u1"));
        assert!(msg.contains("users"));
    }

    #[test]
    fn test_error_display_metadata() {
        let err = Error::metadata("users", "no embedded-group fields declared");
        let msg = err.to_string();
        assert!(msg.contains("metadata error"));
        assert!(msg.contains("no embedded-group fields declared"));
    }

    #[test]
    fn test_error_display_key_encoding() {
        let err = Error::KeyEncoding {
            key: RowKey::text(""),
            reason: "row key is empty".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("cannot encode row key"));
        assert!(msg.contains("row key is empty"));
    }

    #[test]
    fn test_storage_io_preserves_source() {
        let err = Error::StorageIo {
            table: "t".to_string(),
            key: RowKey::text("k"),
            source: StoreError::new("timed out"),
        };
        let source = std::error::Error::source(&err).expect("source");
        assert!(source.to_string().contains("timed out"));
    }

    #[test]
    fn test_error_pattern_matching() {
        let err = Error::metadata("t", "r");
        match err {
            Error::Metadata { table, reason } => {
                assert_eq!(table, "t");
                assert_eq!(reason, "r");
            }
            _ => panic!("wrong error variant"),
        }
    }
}
