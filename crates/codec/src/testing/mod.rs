//! In-memory test doubles
//!
//! Provides the pieces needed to exercise the codec without a cluster:
//!
//! - [`MemoryColumnStore`]: a [`ColumnStore`] over hash maps that honors the
//!   page ceiling, records reads and writes, and can inject failures per key
//! - [`RowMaterializer`]: an [`EntityAssembler`] that materializes rows into
//!   plain records for assertions
//! - [`FixtureMetadata`]: a struct [`EntityMetadata`] with one constructor
//!   per row shape

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use widerow_core::{
    CanonicalRow, ColumnStore, ConsistencyLevel, EntityAssembler, EntityMetadata, NamedGroup,
    ReplyEnvelope, Result, RowColumns, RowShape, StorageKey, StoreError,
};

type TableKey = (String, StorageKey);

#[derive(Default)]
struct Inner {
    flat: FxHashMap<TableKey, Vec<ReplyEnvelope>>,
    grouped: FxHashMap<TableKey, Vec<NamedGroup>>,
    written: FxHashMap<TableKey, RowColumns>,
    failures: FxHashMap<StorageKey, String>,
    column_reads: usize,
    group_reads: usize,
    writes: usize,
}

/// In-memory [`ColumnStore`] for tests.
///
/// Seeded rows are returned truncated to the requested page limit, matching
/// the cluster contract. Reads and writes are counted; keys registered via
/// [`MemoryColumnStore::fail_key`] fail every call that touches them.
#[derive(Default)]
pub struct MemoryColumnStore {
    inner: RwLock<Inner>,
}

impl MemoryColumnStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a flat row
    pub fn insert_flat(&self, table: &str, key: StorageKey, envelopes: Vec<ReplyEnvelope>) {
        self.inner
            .write()
            .flat
            .insert((table.to_string(), key), envelopes);
    }

    /// Seed a grouped row
    pub fn insert_groups(&self, table: &str, key: StorageKey, groups: Vec<NamedGroup>) {
        self.inner
            .write()
            .grouped
            .insert((table.to_string(), key), groups);
    }

    /// Make every call touching `key` fail with the given message
    pub fn fail_key(&self, key: StorageKey, message: &str) {
        self.inner
            .write()
            .failures
            .insert(key, message.to_string());
    }

    /// Number of flat-column reads issued so far
    pub fn column_reads(&self) -> usize {
        self.inner.read().column_reads
    }

    /// Number of group-scoped reads issued so far
    pub fn group_reads(&self) -> usize {
        self.inner.read().group_reads
    }

    /// Number of writes issued so far
    pub fn writes(&self) -> usize {
        self.inner.read().writes
    }

    /// The columns last written under `(table, key)`, if any
    pub fn written(&self, table: &str, key: &StorageKey) -> Option<RowColumns> {
        self.inner
            .read()
            .written
            .get(&(table.to_string(), key.clone()))
            .cloned()
    }

    fn check_failure(inner: &Inner, key: &StorageKey) -> std::result::Result<(), StoreError> {
        match inner.failures.get(key) {
            Some(message) => Err(StoreError::new(message.clone())),
            None => Ok(()),
        }
    }
}

impl ColumnStore for MemoryColumnStore {
    fn read_columns(
        &self,
        table: &str,
        keys: &[StorageKey],
        page_limit: usize,
        _consistency: ConsistencyLevel,
    ) -> std::result::Result<FxHashMap<StorageKey, Vec<ReplyEnvelope>>, StoreError> {
        let mut inner = self.inner.write();
        inner.column_reads += 1;

        let mut replies = FxHashMap::default();
        for key in keys {
            Self::check_failure(&inner, key)?;
            if let Some(envelopes) = inner.flat.get(&(table.to_string(), key.clone())) {
                let mut page = envelopes.clone();
                page.truncate(page_limit);
                replies.insert(key.clone(), page);
            }
        }
        Ok(replies)
    }

    fn read_groups(
        &self,
        table: &str,
        key: &StorageKey,
        page_limit: usize,
        _consistency: ConsistencyLevel,
    ) -> std::result::Result<Vec<NamedGroup>, StoreError> {
        let mut inner = self.inner.write();
        inner.group_reads += 1;

        Self::check_failure(&inner, key)?;
        let mut page = inner
            .grouped
            .get(&(table.to_string(), key.clone()))
            .cloned()
            .unwrap_or_default();
        page.truncate(page_limit);
        Ok(page)
    }

    fn write_row(
        &self,
        table: &str,
        key: &StorageKey,
        columns: &RowColumns,
        _consistency: ConsistencyLevel,
    ) -> std::result::Result<(), StoreError> {
        let mut inner = self.inner.write();
        inner.writes += 1;

        Self::check_failure(&inner, key)?;
        inner
            .written
            .insert((table.to_string(), key.clone()), columns.clone());
        Ok(())
    }
}

/// The record [`RowMaterializer`] produces for one fetched row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializedRow {
    /// The canonical row as the codec produced it
    pub row: CanonicalRow,
    /// Shape of the row
    pub shape: RowShape,
    /// Relation names assembly was asked to resolve
    pub relation_names: Vec<String>,
    /// Whether wrapping was requested
    pub wrap_requested: bool,
}

/// [`EntityAssembler`] double that materializes rows verbatim.
pub struct RowMaterializer;

impl EntityAssembler for RowMaterializer {
    type Entity = MaterializedRow;

    fn assemble(
        &self,
        _metadata: &dyn EntityMetadata,
        row: CanonicalRow,
        relation_names: &[String],
        wrap_requested: bool,
    ) -> Result<Self::Entity> {
        Ok(MaterializedRow {
            shape: row.shape(),
            row,
            relation_names: relation_names.to_vec(),
            wrap_requested,
        })
    }
}

/// Struct [`EntityMetadata`] for tests, one constructor per row shape.
#[derive(Debug, Clone)]
pub struct FixtureMetadata {
    table: String,
    key_field: String,
    counter: bool,
    group_fields: Vec<String>,
}

impl FixtureMetadata {
    /// Flat plain-column entity
    pub fn flat(table: &str) -> Self {
        FixtureMetadata {
            table: table.to_string(),
            key_field: "id".to_string(),
            counter: false,
            group_fields: Vec::new(),
        }
    }

    /// Flat counter-column entity
    pub fn counter(table: &str) -> Self {
        FixtureMetadata {
            counter: true,
            ..Self::flat(table)
        }
    }

    /// Embedded-group entity with the given group fields
    pub fn grouped(table: &str, fields: &[&str]) -> Self {
        FixtureMetadata {
            group_fields: fields.iter().map(|f| f.to_string()).collect(),
            ..Self::flat(table)
        }
    }

    /// Counter-embedded-group entity with the given group fields
    pub fn counter_grouped(table: &str, fields: &[&str]) -> Self {
        FixtureMetadata {
            counter: true,
            ..Self::grouped(table, fields)
        }
    }
}

impl EntityMetadata for FixtureMetadata {
    fn table_name(&self) -> &str {
        &self.table
    }

    fn key_field(&self) -> &str {
        &self.key_field
    }

    fn is_counter_type(&self) -> bool {
        self.counter
    }

    fn embedded_group_fields(&self) -> &[String] {
        &self.group_fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use widerow_core::{Column, FetchLimits, RowKey};

    fn key(text: &str) -> StorageKey {
        RowKey::text(text).encode(&FetchLimits::default()).unwrap()
    }

    #[test]
    fn test_memory_store_omits_absent_keys_from_reply() {
        let store = MemoryColumnStore::new();
        store.insert_flat(
            "t",
            key("present"),
            vec![ReplyEnvelope::column(Column::new(
                b"c".to_vec(),
                b"v".to_vec(),
                1,
            ))],
        );

        let replies = store
            .read_columns(
                "t",
                &[key("present"), key("absent")],
                100,
                ConsistencyLevel::One,
            )
            .unwrap();
        assert_eq!(replies.len(), 1);
        assert!(replies.contains_key(&key("present")));
    }

    #[test]
    fn test_memory_store_truncates_to_page_limit() {
        let store = MemoryColumnStore::new();
        let envelopes: Vec<ReplyEnvelope> = (0..5)
            .map(|i| {
                ReplyEnvelope::column(Column::new(format!("c{}", i).into_bytes(), b"v".to_vec(), 1))
            })
            .collect();
        store.insert_flat("t", key("k"), envelopes);

        let replies = store
            .read_columns("t", &[key("k")], 3, ConsistencyLevel::One)
            .unwrap();
        assert_eq!(replies[&key("k")].len(), 3);
    }

    #[test]
    fn test_memory_store_failure_injection() {
        let store = MemoryColumnStore::new();
        store.fail_key(key("bad"), "boom");

        let result = store.read_columns("t", &[key("bad")], 10, ConsistencyLevel::One);
        assert!(result.is_err());
        let result = store.read_groups("t", &key("bad"), 10, ConsistencyLevel::One);
        assert!(result.is_err());
    }

    #[test]
    fn test_fixture_metadata_shapes() {
        assert_eq!(
            RowShape::classify(&FixtureMetadata::flat("t")),
            RowShape::Plain
        );
        assert_eq!(
            RowShape::classify(&FixtureMetadata::counter("t")),
            RowShape::Counter
        );
        assert_eq!(
            RowShape::classify(&FixtureMetadata::grouped("t", &["g"])),
            RowShape::EmbeddedGroup
        );
        assert_eq!(
            RowShape::classify(&FixtureMetadata::counter_grouped("t", &["g"])),
            RowShape::CounterEmbeddedGroup
        );
    }
}
