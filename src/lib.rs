//! widerow - entity-row codec for wide-column stores
//!
//! widerow translates between application-level entities (described by field
//! metadata) and a wide-column storage model where a row holds flat columns,
//! embedded column groups, or counter variants of either. One call path
//! covers all four on-wire row shapes; the shape is resolved once per
//! request from entity metadata.
//!
//! # Quick Start
//!
//! ```ignore
//! use widerow::{BatchFetcher, FetchRequest, RowCodec, RowKey};
//!
//! // `store` is your ColumnStore client, `assembler` your EntityAssembler.
//! let codec = RowCodec::new(store, assembler);
//!
//! // Single key: absent rows come back as None, not as errors.
//! let entity = codec.fetch_one(&metadata, &RowKey::text("u1"), &[], false, Default::default())?;
//!
//! // Many keys: output preserves key order, absent keys are skipped.
//! let request = FetchRequest::new(&metadata, vec![RowKey::text("u1"), RowKey::text("u2")]);
//! let entities = BatchFetcher::new(&codec).fetch_many(&request)?;
//! ```
//!
//! # Architecture
//!
//! `widerow-core` holds the types and the collaborator seams (the
//! [`ColumnStore`] storage client and the [`EntityAssembler`] entity
//! assembly contracts); `widerow-codec` holds the fetch and write-back
//! machinery. This façade re-exports both.

pub use widerow_codec::{build_plain_row, stamp, BatchFetcher, FetchRequest, RowCodec};
pub use widerow_core::{
    validate_for_shape, CanonicalRow, Column, ColumnGroup, ColumnStore, ConsistencyLevel,
    CounterColumn, CounterGroup, EntityAssembler, EntityMetadata, Error, FetchLimits, NamedGroup,
    ReplyEnvelope, Result, RowColumns, RowKey, RowShape, StorageKey, StoreError, ROW_PAGE_LIMIT,
};

/// Test doubles re-exported for downstream integration tests
pub mod testing {
    pub use widerow_codec::testing::{
        FixtureMetadata, MaterializedRow, MemoryColumnStore, RowMaterializer,
    };
}
