//! Entity-row codec for wide-column stores
//!
//! This crate implements the fetch and write-back machinery over the types
//! and collaborator seams defined in `widerow-core`:
//! - RowCodec: single-key fetch through the storage client, with the
//!   flat-shape envelope merge and shape-checked write-back
//! - BatchFetcher / FetchRequest: ordered multi-key fetch that skips absent
//!   rows and aborts on the first per-key error
//! - testing: in-memory doubles (MemoryColumnStore, RowMaterializer,
//!   FixtureMetadata)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod fetch;
pub mod testing;

pub use batch::{BatchFetcher, FetchRequest};
pub use fetch::{build_plain_row, stamp, RowCodec};
