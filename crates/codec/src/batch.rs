//! Multi-key fetch
//!
//! [`BatchFetcher`] folds one [`FetchRequest`] over the single-key codec:
//! keys are read sequentially in caller order, absent keys are skipped, and
//! the first per-key error aborts the whole batch. Callers needing
//! partial-failure semantics wrap individual `fetch_one` calls themselves.

use crate::fetch::RowCodec;
use widerow_core::{
    ColumnStore, ConsistencyLevel, EntityAssembler, EntityMetadata, Result, RowKey,
};

/// One multi-key fetch: metadata, ordered keys, and assembly pass-throughs.
pub struct FetchRequest<'m> {
    /// Entity layout, borrowed from the metadata provider for this call
    pub metadata: &'m dyn EntityMetadata,
    /// Ordered row keys to fetch
    pub keys: Vec<RowKey>,
    /// Relation names handed through to entity assembly
    pub relation_names: Vec<String>,
    /// Whether assembly should wrap entities for partial materialization
    pub wrap_requested: bool,
    /// Replica acknowledgment level for every read in the batch
    pub consistency: ConsistencyLevel,
}

impl<'m> FetchRequest<'m> {
    /// Request with no relations, no wrapping, and the default consistency
    pub fn new(metadata: &'m dyn EntityMetadata, keys: Vec<RowKey>) -> Self {
        FetchRequest {
            metadata,
            keys,
            relation_names: Vec::new(),
            wrap_requested: false,
            consistency: ConsistencyLevel::default(),
        }
    }

    /// Set the relation names passed through to assembly
    pub fn relations(mut self, relation_names: Vec<String>) -> Self {
        self.relation_names = relation_names;
        self
    }

    /// Request wrapped (partially materialized) entities
    pub fn wrapped(mut self) -> Self {
        self.wrap_requested = true;
        self
    }

    /// Set the consistency level
    pub fn at_consistency(mut self, consistency: ConsistencyLevel) -> Self {
        self.consistency = consistency;
        self
    }
}

/// Sequential multi-key fetcher over a [`RowCodec`].
///
/// Stateless: each call walks the request's keys in order and retains
/// nothing afterwards.
pub struct BatchFetcher<'c, S, A> {
    codec: &'c RowCodec<S, A>,
}

impl<'c, S: ColumnStore, A: EntityAssembler> BatchFetcher<'c, S, A> {
    /// Create a fetcher over the given codec
    pub fn new(codec: &'c RowCodec<S, A>) -> Self {
        BatchFetcher { codec }
    }

    /// Fetch every key in the request, in key order, skipping absent rows.
    ///
    /// An empty key sequence returns an empty vector without issuing any
    /// read.
    ///
    /// # Errors
    ///
    /// The first failing key aborts the batch; the returned error names the
    /// key (no partial sequence is returned).
    pub fn fetch_many(&self, request: &FetchRequest<'_>) -> Result<Vec<A::Entity>> {
        let mut entities = Vec::with_capacity(request.keys.len());
        for key in &request.keys {
            let fetched = self.codec.fetch_one(
                request.metadata,
                key,
                &request.relation_names,
                request.wrap_requested,
                request.consistency,
            )?;
            if let Some(entity) = fetched {
                entities.push(entity);
            }
        }
        Ok(entities)
    }
}
