//! Collaborator seams: storage client and entity assembly
//!
//! Both sides of the codec are traits so the codec can be exercised against
//! in-memory doubles and swapped onto a real cluster client without touching
//! the call path.

use crate::error::Result;
use crate::metadata::EntityMetadata;
use crate::row::{CanonicalRow, RowColumns};
use crate::types::{ConsistencyLevel, NamedGroup, ReplyEnvelope, StorageKey};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Opaque storage-client failure (network, protocol, or cluster-side).
///
/// The codec wraps it into `Error::StorageIo` with table and key context;
/// clients only need to supply a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct StoreError {
    message: String,
}

impl StoreError {
    /// Create a store error with the given message
    pub fn new(message: impl Into<String>) -> Self {
        StoreError {
            message: message.into(),
        }
    }

    /// The failure message
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Storage-cluster client contract.
///
/// Calls are synchronous and may block on network I/O; timeouts are the
/// client's responsibility and surface as [`StoreError`]. Absent rows appear
/// as missing map entries (or empty group sequences), never as errors.
///
/// # Thread Safety
///
/// Clients must be safe to share across threads (`Send + Sync`); the codec
/// holds no lock around calls.
pub trait ColumnStore: Send + Sync {
    /// Read up to `page_limit` column envelopes per key for the given keys.
    ///
    /// Keys with no stored row are omitted from the reply map.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the read fails.
    fn read_columns(
        &self,
        table: &str,
        keys: &[StorageKey],
        page_limit: usize,
        consistency: ConsistencyLevel,
    ) -> std::result::Result<FxHashMap<StorageKey, Vec<ReplyEnvelope>>, StoreError>;

    /// Read up to `page_limit` ordered embedded groups for one key.
    ///
    /// An absent row yields an empty sequence.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the read fails.
    fn read_groups(
        &self,
        table: &str,
        key: &StorageKey,
        page_limit: usize,
        consistency: ConsistencyLevel,
    ) -> std::result::Result<Vec<NamedGroup>, StoreError>;

    /// Write one row's columns under the given key.
    ///
    /// The payload shape (plain, counter, grouped) is carried by
    /// [`RowColumns`] itself; counter payloads must be applied with counter
    /// semantics by the client.
    ///
    /// # Errors
    ///
    /// Returns a [`StoreError`] if the write fails.
    fn write_row(
        &self,
        table: &str,
        key: &StorageKey,
        columns: &RowColumns,
        consistency: ConsistencyLevel,
    ) -> std::result::Result<(), StoreError>;
}

/// Entity-assembly contract.
///
/// Invoked once per non-absent row, in key order for batch fetches. The
/// `wrap_requested` flag signals partial/lazy materialization and is opaque
/// to the codec.
pub trait EntityAssembler {
    /// The assembled entity type
    type Entity;

    /// Assemble one entity from a canonical row.
    ///
    /// # Errors
    ///
    /// Returns an error if the row cannot be mapped onto the entity layout
    /// described by `metadata`.
    fn assemble(
        &self,
        metadata: &dyn EntityMetadata,
        row: CanonicalRow,
        relation_names: &[String],
        wrap_requested: bool,
    ) -> Result<Self::Entity>;
}
