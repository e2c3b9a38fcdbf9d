//! Wire and key types for the entity-row codec
//!
//! This module defines the foundational types:
//! - RowKey: opaque row identifier (text or raw bytes)
//! - StorageKey: store-native key encoding used on the wire
//! - ConsistencyLevel: per-request replica acknowledgment level
//! - Column / CounterColumn: the two column kinds of a wide-column store
//! - ColumnGroup / CounterGroup: named embedded column groups
//! - ReplyEnvelope / NamedGroup: read-reply items returned by the store

use crate::error::{Error, Result};
use crate::limits::FetchLimits;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque identifier for one row in a column family.
///
/// Callers hand keys in as text or raw bytes; before any read or write the
/// key is converted to the store-native [`StorageKey`] form via
/// [`RowKey::encode`]. The conversion is fallible (see `KeyEncoding` errors).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowKey {
    /// UTF-8 text key
    Text(String),
    /// Raw byte key
    Bytes(Vec<u8>),
}

impl RowKey {
    /// Create a text key
    pub fn text(s: impl Into<String>) -> Self {
        RowKey::Text(s.into())
    }

    /// Create a raw byte key
    pub fn bytes(b: impl Into<Vec<u8>>) -> Self {
        RowKey::Bytes(b.into())
    }

    /// View the key as raw bytes (text keys as their UTF-8 bytes)
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            RowKey::Text(s) => s.as_bytes(),
            RowKey::Bytes(b) => b,
        }
    }

    /// Convert to the store-native key form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::KeyEncoding`] if the key is empty or exceeds the
    /// configured key-length limit.
    pub fn encode(&self, limits: &FetchLimits) -> Result<StorageKey> {
        let bytes = self.as_bytes();
        if bytes.is_empty() {
            return Err(Error::KeyEncoding {
                key: self.clone(),
                reason: "row key is empty".to_string(),
            });
        }
        if bytes.len() > limits.max_key_bytes {
            return Err(Error::KeyEncoding {
                key: self.clone(),
                reason: format!(
                    "row key is {} bytes, limit is {}",
                    bytes.len(),
                    limits.max_key_bytes
                ),
            });
        }
        Ok(StorageKey(bytes.to_vec()))
    }
}

impl From<&str> for RowKey {
    fn from(s: &str) -> Self {
        RowKey::Text(s.to_string())
    }
}

impl From<String> for RowKey {
    fn from(s: String) -> Self {
        RowKey::Text(s)
    }
}

impl From<Vec<u8>> for RowKey {
    fn from(b: Vec<u8>) -> Self {
        RowKey::Bytes(b)
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Text(s) => write!(f, "{}", s),
            RowKey::Bytes(b) => {
                write!(f, "0x")?;
                for byte in b {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
        }
    }
}

/// Store-native key form.
///
/// Used as the reply-map key for multi-key reads, so it must hash and
/// compare by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageKey(Vec<u8>);

impl StorageKey {
    /// View the encoded key bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

/// Replica acknowledgment level for one read or write.
///
/// Opaque to the codec: it is threaded through to the storage client
/// unchanged on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConsistencyLevel {
    /// One replica acknowledgment
    #[default]
    One,
    /// Two replica acknowledgments
    Two,
    /// Three replica acknowledgments
    Three,
    /// Quorum of replicas
    Quorum,
    /// Quorum within the local datacenter
    LocalQuorum,
    /// Quorum within every datacenter
    EachQuorum,
    /// All replicas
    All,
}

impl fmt::Display for ConsistencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConsistencyLevel::One => "ONE",
            ConsistencyLevel::Two => "TWO",
            ConsistencyLevel::Three => "THREE",
            ConsistencyLevel::Quorum => "QUORUM",
            ConsistencyLevel::LocalQuorum => "LOCAL_QUORUM",
            ConsistencyLevel::EachQuorum => "EACH_QUORUM",
            ConsistencyLevel::All => "ALL",
        };
        write!(f, "{}", name)
    }
}

/// One named column: arbitrary byte payload plus a write timestamp
/// (epoch microseconds).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Column name bytes
    pub name: Vec<u8>,
    /// Column value bytes
    pub value: Vec<u8>,
    /// Write timestamp in epoch microseconds
    pub timestamp: i64,
}

impl Column {
    /// Create a column
    pub fn new(name: impl Into<Vec<u8>>, value: impl Into<Vec<u8>>, timestamp: i64) -> Self {
        Column {
            name: name.into(),
            value: value.into(),
            timestamp,
        }
    }
}

/// One named counter column: the value is always a 64-bit integer count,
/// never a byte payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterColumn {
    /// Column name bytes
    pub name: Vec<u8>,
    /// Current count
    pub count: i64,
}

impl CounterColumn {
    /// Create a counter column
    pub fn new(name: impl Into<Vec<u8>>, count: i64) -> Self {
        CounterColumn {
            name: name.into(),
            count,
        }
    }
}

/// A named, ordered sub-collection of plain columns nested within a row.
///
/// The group name corresponds to one of the metadata-declared
/// embedded-group field names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnGroup {
    /// Group name bytes
    pub name: Vec<u8>,
    /// Columns in group order
    pub columns: Vec<Column>,
}

impl ColumnGroup {
    /// Create a column group
    pub fn new(name: impl Into<Vec<u8>>, columns: Vec<Column>) -> Self {
        ColumnGroup {
            name: name.into(),
            columns,
        }
    }
}

/// The counter variant of [`ColumnGroup`]: a named, ordered sub-collection
/// of counter columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CounterGroup {
    /// Group name bytes
    pub name: Vec<u8>,
    /// Counter columns in group order
    pub columns: Vec<CounterColumn>,
}

impl CounterGroup {
    /// Create a counter group
    pub fn new(name: impl Into<Vec<u8>>, columns: Vec<CounterColumn>) -> Self {
        CounterGroup {
            name: name.into(),
            columns,
        }
    }
}

/// Uniform per-item reply from a flat column read.
///
/// The store's read API returns one envelope per item, and the envelope can
/// carry either a bare column or a whole nested group even when the logical
/// row shape is flat. At most one of the four fields may be populated; an
/// envelope with more than one populated field (or none) is malformed and
/// the codec rejects it with a `Metadata` error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyEnvelope {
    /// Bare plain column, if the item is a flat column
    pub column: Option<Column>,
    /// Bare counter column, if the item is a flat counter
    pub counter_column: Option<CounterColumn>,
    /// Nested plain group, if the item carries an embedded group
    pub group: Option<ColumnGroup>,
    /// Nested counter group, if the item carries an embedded counter group
    pub counter_group: Option<CounterGroup>,
}

impl ReplyEnvelope {
    /// Envelope carrying one bare plain column
    pub fn column(column: Column) -> Self {
        ReplyEnvelope {
            column: Some(column),
            ..Default::default()
        }
    }

    /// Envelope carrying one bare counter column
    pub fn counter_column(counter: CounterColumn) -> Self {
        ReplyEnvelope {
            counter_column: Some(counter),
            ..Default::default()
        }
    }

    /// Envelope carrying one nested plain group
    pub fn group(group: ColumnGroup) -> Self {
        ReplyEnvelope {
            group: Some(group),
            ..Default::default()
        }
    }

    /// Envelope carrying one nested counter group
    pub fn counter_group(group: CounterGroup) -> Self {
        ReplyEnvelope {
            counter_group: Some(group),
            ..Default::default()
        }
    }

    /// Number of populated payload fields (a well-formed envelope has
    /// exactly one)
    pub fn populated(&self) -> usize {
        usize::from(self.column.is_some())
            + usize::from(self.counter_column.is_some())
            + usize::from(self.group.is_some())
            + usize::from(self.counter_group.is_some())
    }
}

/// One item of a group-scoped read reply: a plain or counter embedded group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NamedGroup {
    /// Plain embedded group
    Plain(ColumnGroup),
    /// Counter embedded group
    Counter(CounterGroup),
}

impl NamedGroup {
    /// The group name bytes, independent of variant
    pub fn name(&self) -> &[u8] {
        match self {
            NamedGroup::Plain(g) => &g.name,
            NamedGroup::Counter(g) => &g.name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // === RowKey Tests ===

    #[test]
    fn test_row_key_text_encodes_utf8_bytes() {
        let key = RowKey::text("user:42");
        let encoded = key.encode(&FetchLimits::default()).unwrap();
        assert_eq!(encoded.as_bytes(), b"user:42");
    }

    #[test]
    fn test_row_key_bytes_encodes_verbatim() {
        let key = RowKey::bytes(vec![0x00, 0xFF, 0x10]);
        let encoded = key.encode(&FetchLimits::default()).unwrap();
        assert_eq!(encoded.as_bytes(), &[0x00, 0xFF, 0x10]);
    }

    #[test]
    fn test_empty_key_fails_encoding() {
        let key = RowKey::text("");
        let result = key.encode(&FetchLimits::default());
        assert!(matches!(result, Err(Error::KeyEncoding { .. })));
    }

    #[test]
    fn test_oversized_key_fails_encoding() {
        let limits = FetchLimits::default();
        let key = RowKey::text("x".repeat(limits.max_key_bytes + 1));
        let result = key.encode(&limits);
        assert!(matches!(result, Err(Error::KeyEncoding { .. })));
    }

    #[test]
    fn test_key_at_limit_encodes() {
        let limits = FetchLimits::default();
        let key = RowKey::text("x".repeat(limits.max_key_bytes));
        assert!(key.encode(&limits).is_ok());
    }

    #[test]
    fn test_row_key_display() {
        assert_eq!(RowKey::text("abc").to_string(), "abc");
        assert_eq!(RowKey::bytes(vec![0xDE, 0xAD]).to_string(), "0xdead");
    }

    #[test]
    fn test_row_key_from_conversions() {
        assert_eq!(RowKey::from("k"), RowKey::Text("k".to_string()));
        assert_eq!(RowKey::from("k".to_string()), RowKey::Text("k".to_string()));
        assert_eq!(RowKey::from(vec![1u8]), RowKey::Bytes(vec![1]));
    }

    // === ConsistencyLevel Tests ===

    #[test]
    fn test_consistency_default_is_one() {
        assert_eq!(ConsistencyLevel::default(), ConsistencyLevel::One);
    }

    #[test]
    fn test_consistency_display() {
        assert_eq!(ConsistencyLevel::Quorum.to_string(), "QUORUM");
        assert_eq!(ConsistencyLevel::LocalQuorum.to_string(), "LOCAL_QUORUM");
    }

    // === ReplyEnvelope Tests ===

    #[test]
    fn test_envelope_constructors_populate_exactly_one() {
        let col = Column::new(b"n".to_vec(), b"v".to_vec(), 1);
        let ctr = CounterColumn::new(b"n".to_vec(), 7);
        let group = ColumnGroup::new(b"g".to_vec(), vec![col.clone()]);
        let cgroup = CounterGroup::new(b"g".to_vec(), vec![ctr.clone()]);

        assert_eq!(ReplyEnvelope::column(col).populated(), 1);
        assert_eq!(ReplyEnvelope::counter_column(ctr).populated(), 1);
        assert_eq!(ReplyEnvelope::group(group).populated(), 1);
        assert_eq!(ReplyEnvelope::counter_group(cgroup).populated(), 1);
    }

    #[test]
    fn test_empty_envelope_populates_zero() {
        assert_eq!(ReplyEnvelope::default().populated(), 0);
    }

    #[test]
    fn test_named_group_name_across_variants() {
        let plain = NamedGroup::Plain(ColumnGroup::new(b"addr".to_vec(), vec![]));
        let counter = NamedGroup::Counter(CounterGroup::new(b"hits".to_vec(), vec![]));
        assert_eq!(plain.name(), b"addr");
        assert_eq!(counter.name(), b"hits");
    }
}
