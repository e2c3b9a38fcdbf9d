//! Single-key row codec
//!
//! [`RowCodec`] drives one fetch end to end: resolve the row shape from
//! metadata, encode the key, issue the shape-appropriate read through the
//! storage client, normalize the reply into a [`CanonicalRow`], and hand it
//! to entity assembly. The write-back direction ([`RowCodec::store_one`])
//! takes a canonical row and forwards it to the client after checking it
//! against the metadata's shape.

use tracing::{debug, warn};
use widerow_core::{
    validate_for_shape, CanonicalRow, Column, ColumnStore, ConsistencyLevel, EntityAssembler,
    EntityMetadata, Error, FetchLimits, NamedGroup, ReplyEnvelope, Result, RowColumns, RowKey,
    RowShape, StorageKey,
};

/// Current write timestamp in epoch microseconds.
///
/// Stamped onto plain columns built for the write path; the store resolves
/// concurrent writes to the same column by timestamp.
pub fn stamp() -> i64 {
    chrono::Utc::now().timestamp_micros()
}

/// Build a flat plain-column [`CanonicalRow`] from name/value pairs,
/// stamping every column with the current write timestamp.
pub fn build_plain_row(
    key: RowKey,
    table: impl Into<String>,
    fields: impl IntoIterator<Item = (Vec<u8>, Vec<u8>)>,
) -> CanonicalRow {
    let timestamp = stamp();
    let columns = fields
        .into_iter()
        .map(|(name, value)| Column::new(name, value, timestamp))
        .collect();
    CanonicalRow::new(key, table, RowColumns::Plain(columns))
}

/// Entity-row codec over one storage client and one assembler.
///
/// Stateless per call: no session or cursor state is retained between
/// fetches, and metadata is borrowed for the duration of each call.
pub struct RowCodec<S, A> {
    store: S,
    assembler: A,
    limits: FetchLimits,
}

impl<S: ColumnStore, A: EntityAssembler> RowCodec<S, A> {
    /// Create a codec with the production limits
    pub fn new(store: S, assembler: A) -> Self {
        Self::with_limits(store, assembler, FetchLimits::default())
    }

    /// Create a codec with explicit limits
    pub fn with_limits(store: S, assembler: A, limits: FetchLimits) -> Self {
        RowCodec {
            store,
            assembler,
            limits,
        }
    }

    /// The limits this codec applies
    pub fn limits(&self) -> &FetchLimits {
        &self.limits
    }

    /// The storage client this codec reads through
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Fetch one row by key and assemble it into an entity.
    ///
    /// Returns `Ok(None)` when the key has no stored row — absence is not
    /// an error and does not abort a batch.
    ///
    /// # Errors
    ///
    /// - [`Error::StorageIo`] if the underlying read fails
    /// - [`Error::Metadata`] if metadata is missing fields the resolved
    ///   shape requires, or the reply contradicts the shape
    /// - [`Error::KeyEncoding`] if the key cannot take store-native form
    pub fn fetch_one(
        &self,
        metadata: &dyn EntityMetadata,
        key: &RowKey,
        relation_names: &[String],
        wrap_requested: bool,
        consistency: ConsistencyLevel,
    ) -> Result<Option<A::Entity>> {
        let shape = RowShape::classify(metadata);
        validate_for_shape(metadata, shape)?;
        let storage_key = key.encode(&self.limits)?;

        debug!(%key, table = metadata.table_name(), %shape, "fetching row");

        let columns = if shape.is_grouped() {
            self.fetch_grouped(metadata, key, &storage_key, shape, consistency)?
        } else {
            self.fetch_flat(metadata, key, &storage_key, shape, consistency)?
        };

        let Some(columns) = columns else {
            debug!(%key, table = metadata.table_name(), "row absent");
            return Ok(None);
        };

        let row = CanonicalRow::new(key.clone(), metadata.table_name(), columns);
        let entity = self
            .assembler
            .assemble(metadata, row, relation_names, wrap_requested)?;
        Ok(Some(entity))
    }

    /// Write one canonical row through the storage client.
    ///
    /// # Errors
    ///
    /// - [`Error::Metadata`] if the row's shape or table disagrees with the
    ///   metadata (no write is issued)
    /// - [`Error::KeyEncoding`] if the key cannot take store-native form
    /// - [`Error::StorageIo`] if the underlying write fails
    pub fn store_one(
        &self,
        metadata: &dyn EntityMetadata,
        row: &CanonicalRow,
        consistency: ConsistencyLevel,
    ) -> Result<()> {
        let shape = RowShape::classify(metadata);
        validate_for_shape(metadata, shape)?;
        if row.shape() != shape {
            return Err(Error::metadata(
                metadata.table_name(),
                format!(
                    "row shape {} does not match metadata shape {}",
                    row.shape(),
                    shape
                ),
            ));
        }
        if row.table != metadata.table_name() {
            return Err(Error::metadata(
                metadata.table_name(),
                format!("row targets table {}", row.table),
            ));
        }
        let storage_key = row.key.encode(&self.limits)?;
        self.store
            .write_row(&row.table, &storage_key, &row.columns, consistency)
            .map_err(|source| Error::StorageIo {
                table: row.table.clone(),
                key: row.key.clone(),
                source,
            })
    }

    /// Group-scoped read: EmbeddedGroup and CounterEmbeddedGroup shapes.
    fn fetch_grouped(
        &self,
        metadata: &dyn EntityMetadata,
        key: &RowKey,
        storage_key: &StorageKey,
        shape: RowShape,
        consistency: ConsistencyLevel,
    ) -> Result<Option<RowColumns>> {
        let table = metadata.table_name();
        let groups = self
            .store
            .read_groups(table, storage_key, self.limits.page_limit, consistency)
            .map_err(|source| Error::StorageIo {
                table: table.to_string(),
                key: key.clone(),
                source,
            })?;

        if groups.is_empty() {
            return Ok(None);
        }
        if groups.len() == self.limits.page_limit {
            warn!(
                %key,
                table,
                page_limit = self.limits.page_limit,
                "group read filled the page; groups beyond the ceiling are not retrieved"
            );
        }

        if shape.is_counter() {
            let mut out = Vec::with_capacity(groups.len());
            for group in groups {
                match group {
                    NamedGroup::Counter(g) => out.push(g),
                    NamedGroup::Plain(_) => {
                        return Err(Error::metadata(
                            table,
                            "plain group in a counter-embedded-group row",
                        ))
                    }
                }
            }
            Ok(Some(RowColumns::CounterGroups(out)))
        } else {
            let mut out = Vec::with_capacity(groups.len());
            for group in groups {
                match group {
                    NamedGroup::Plain(g) => out.push(g),
                    NamedGroup::Counter(_) => {
                        return Err(Error::metadata(
                            table,
                            "counter group in an embedded-group row",
                        ))
                    }
                }
            }
            Ok(Some(RowColumns::Groups(out)))
        }
    }

    /// Flat read: Plain and Counter shapes, with the envelope merge.
    fn fetch_flat(
        &self,
        metadata: &dyn EntityMetadata,
        key: &RowKey,
        storage_key: &StorageKey,
        shape: RowShape,
        consistency: ConsistencyLevel,
    ) -> Result<Option<RowColumns>> {
        let table = metadata.table_name();
        let mut replies = self
            .store
            .read_columns(
                table,
                std::slice::from_ref(storage_key),
                self.limits.page_limit,
                consistency,
            )
            .map_err(|source| Error::StorageIo {
                table: table.to_string(),
                key: key.clone(),
                source,
            })?;

        let Some(envelopes) = replies.remove(storage_key) else {
            return Ok(None);
        };
        if envelopes.is_empty() {
            return Ok(None);
        }
        if envelopes.len() == self.limits.page_limit {
            warn!(
                %key,
                table,
                page_limit = self.limits.page_limit,
                "column read filled the page; columns beyond the ceiling are not retrieved"
            );
        }

        let columns = if shape.is_counter() {
            RowColumns::Counter(flatten_counter(table, envelopes)?)
        } else {
            RowColumns::Plain(flatten_plain(table, envelopes)?)
        };
        Ok(Some(columns))
    }
}

/// Merge flat-read envelopes into one plain column list.
///
/// A bare column is taken directly; a nested group is expanded by appending
/// all of its columns. The read API can hand back either kind even when the
/// logical shape is flat, so both must normalize into the same list.
fn flatten_plain(table: &str, envelopes: Vec<ReplyEnvelope>) -> Result<Vec<Column>> {
    let mut columns = Vec::with_capacity(envelopes.len());
    for envelope in envelopes {
        if envelope.populated() != 1 {
            return Err(Error::metadata(
                table,
                "reply envelope must carry exactly one payload",
            ));
        }
        if let Some(column) = envelope.column {
            columns.push(column);
        } else if let Some(group) = envelope.group {
            columns.extend(group.columns);
        } else {
            // the single payload is a counter column or counter group
            return Err(Error::metadata(
                table,
                "counter payload in a plain-column row",
            ));
        }
    }
    Ok(columns)
}

/// Counter variant of [`flatten_plain`]: bare counter columns taken
/// directly, counter groups expanded.
fn flatten_counter(
    table: &str,
    envelopes: Vec<ReplyEnvelope>,
) -> Result<Vec<widerow_core::CounterColumn>> {
    let mut columns = Vec::with_capacity(envelopes.len());
    for envelope in envelopes {
        if envelope.populated() != 1 {
            return Err(Error::metadata(
                table,
                "reply envelope must carry exactly one payload",
            ));
        }
        if let Some(counter) = envelope.counter_column {
            columns.push(counter);
        } else if let Some(group) = envelope.counter_group {
            columns.extend(group.columns);
        } else {
            // the single payload is a plain column or plain group
            return Err(Error::metadata(
                table,
                "plain payload in a counter-column row",
            ));
        }
    }
    Ok(columns)
}
