//! Core types and traits for widerow
//!
//! This crate defines the foundational pieces of the entity-row codec:
//! - RowKey / StorageKey: row identification and store-native key encoding
//! - Column types: Column, CounterColumn, ColumnGroup, CounterGroup
//! - ReplyEnvelope / NamedGroup: read-reply items from the storage client
//! - RowShape: the four on-wire row shapes, resolved from metadata
//! - CanonicalRow: shape-normalized row model consumed by entity assembly
//! - EntityMetadata: read-only accessor trait for entity layout
//! - Traits: ColumnStore and EntityAssembler collaborator seams
//! - FetchLimits: page ceiling and key limits
//! - Error: error type hierarchy

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod limits;
pub mod metadata;
pub mod row;
pub mod shape;
pub mod traits;
pub mod types;

// Re-export commonly used types and traits
pub use error::{Error, Result};
pub use limits::{FetchLimits, ROW_PAGE_LIMIT};
pub use metadata::{validate_for_shape, EntityMetadata};
pub use row::{CanonicalRow, RowColumns};
pub use shape::RowShape;
pub use traits::{ColumnStore, EntityAssembler, StoreError};
pub use types::{
    Column, ColumnGroup, ConsistencyLevel, CounterColumn, CounterGroup, NamedGroup, ReplyEnvelope,
    RowKey, StorageKey,
};
