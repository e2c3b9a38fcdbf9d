//! Shape-normalized row representation
//!
//! [`CanonicalRow`] is the intermediate form every fetch produces,
//! independent of which of the four on-wire shapes the store returned.
//! Downstream entity assembly consumes it uniformly.
//!
//! The column collections are a sum type with exactly one active case, so
//! the "exactly one collection populated" invariant holds by construction
//! rather than by convention over four optional fields.

use crate::shape::RowShape;
use crate::types::{Column, ColumnGroup, CounterColumn, CounterGroup, RowKey};
use serde::{Deserialize, Serialize};

/// The column payload of one row, in exactly one of the four shapes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowColumns {
    /// Flat plain columns
    Plain(Vec<Column>),
    /// Flat counter columns
    Counter(Vec<CounterColumn>),
    /// Embedded plain column groups
    Groups(Vec<ColumnGroup>),
    /// Embedded counter column groups
    CounterGroups(Vec<CounterGroup>),
}

impl RowColumns {
    /// The shape this payload carries
    pub fn shape(&self) -> RowShape {
        match self {
            RowColumns::Plain(_) => RowShape::Plain,
            RowColumns::Counter(_) => RowShape::Counter,
            RowColumns::Groups(_) => RowShape::EmbeddedGroup,
            RowColumns::CounterGroups(_) => RowShape::CounterEmbeddedGroup,
        }
    }

    /// Number of top-level entries (columns for flat shapes, groups for
    /// grouped shapes)
    pub fn len(&self) -> usize {
        match self {
            RowColumns::Plain(c) => c.len(),
            RowColumns::Counter(c) => c.len(),
            RowColumns::Groups(g) => g.len(),
            RowColumns::CounterGroups(g) => g.len(),
        }
    }

    /// Whether the payload holds no entries
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// One fetched row, normalized: key, table, and a single-shape payload.
///
/// Created per fetch call, consumed immediately by entity assembly, then
/// dropped; holds no long-lived ownership.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRow {
    /// The row's key
    pub key: RowKey,
    /// Table (column family) the row came from
    pub table: String,
    /// The row's columns, in exactly one shape
    pub columns: RowColumns,
}

impl CanonicalRow {
    /// Create a canonical row
    pub fn new(key: RowKey, table: impl Into<String>, columns: RowColumns) -> Self {
        CanonicalRow {
            key,
            table: table.into(),
            columns,
        }
    }

    /// The shape of this row's payload
    pub fn shape(&self) -> RowShape {
        self.columns.shape()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(name: &str) -> Column {
        Column::new(name.as_bytes().to_vec(), b"v".to_vec(), 1)
    }

    #[test]
    fn test_shape_matches_active_case() {
        assert_eq!(RowColumns::Plain(vec![]).shape(), RowShape::Plain);
        assert_eq!(RowColumns::Counter(vec![]).shape(), RowShape::Counter);
        assert_eq!(RowColumns::Groups(vec![]).shape(), RowShape::EmbeddedGroup);
        assert_eq!(
            RowColumns::CounterGroups(vec![]).shape(),
            RowShape::CounterEmbeddedGroup
        );
    }

    #[test]
    fn test_len_counts_top_level_entries() {
        let flat = RowColumns::Plain(vec![column("a"), column("b")]);
        assert_eq!(flat.len(), 2);
        assert!(!flat.is_empty());

        let grouped = RowColumns::Groups(vec![ColumnGroup::new(
            b"g".to_vec(),
            vec![column("a"), column("b"), column("c")],
        )]);
        // one group, regardless of how many columns it nests
        assert_eq!(grouped.len(), 1);
    }

    #[test]
    fn test_canonical_row_carries_shape() {
        let row = CanonicalRow::new(
            RowKey::text("k"),
            "users",
            RowColumns::Counter(vec![CounterColumn::new(b"hits".to_vec(), 3)]),
        );
        assert_eq!(row.shape(), RowShape::Counter);
        assert_eq!(row.table, "users");
        assert_eq!(row.key, RowKey::text("k"));
    }
}
