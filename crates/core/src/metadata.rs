//! Entity metadata accessors
//!
//! The metadata provider is an external collaborator; this module defines
//! only the read-only accessor trait the codec consumes. Metadata is passed
//! explicitly into every codec call as a borrowed parameter — never fetched
//! from ambient global state — so the codec stays independently testable.

use crate::error::{Error, Result};
use crate::shape::RowShape;

/// Read-only view of one entity's storage layout.
///
/// Owned and lifecycle-managed by the external metadata provider; the codec
/// borrows it for the duration of one call and never mutates it.
pub trait EntityMetadata {
    /// Storage table (column family) name
    fn table_name(&self) -> &str;

    /// Name of the field holding the row key
    fn key_field(&self) -> &str;

    /// Whether the entity's columns are counters
    fn is_counter_type(&self) -> bool;

    /// Ordered field names that map to embedded column groups
    /// (empty for flat entities)
    fn embedded_group_fields(&self) -> &[String];
}

/// Check that metadata is coherent for a resolved row shape.
///
/// Upstream validation is assumed, so this only guards the contract this
/// codec depends on: a usable table name, a named key field to map the row
/// key onto, and declared group fields for group shapes.
///
/// # Errors
///
/// Returns [`Error::Metadata`] on any inconsistency.
pub fn validate_for_shape(metadata: &dyn EntityMetadata, shape: RowShape) -> Result<()> {
    if metadata.table_name().is_empty() {
        return Err(Error::metadata("<unnamed>", "metadata has no table name"));
    }
    if metadata.key_field().is_empty() {
        return Err(Error::metadata(
            metadata.table_name(),
            "metadata has no key field",
        ));
    }
    if shape.is_grouped() && metadata.embedded_group_fields().is_empty() {
        return Err(Error::metadata(
            metadata.table_name(),
            format!("{} row requires declared embedded-group fields", shape),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestMetadata {
        table: String,
        key_field: String,
        counter: bool,
        groups: Vec<String>,
    }

    impl EntityMetadata for TestMetadata {
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
            &self.groups
        }
    }

    fn metadata(table: &str, key_field: &str, groups: &[&str]) -> TestMetadata {
        TestMetadata {
            table: table.to_string(),
            key_field: key_field.to_string(),
            counter: false,
            groups: groups.iter().map(|g| g.to_string()).collect(),
        }
    }

    #[test]
    fn test_flat_metadata_validates_for_plain() {
        let m = metadata("users", "id", &[]);
        assert!(validate_for_shape(&m, RowShape::Plain).is_ok());
    }

    #[test]
    fn test_group_shape_requires_group_fields() {
        let m = metadata("users", "id", &[]);
        let result = validate_for_shape(&m, RowShape::EmbeddedGroup);
        assert!(matches!(result, Err(Error::Metadata { .. })));
    }

    #[test]
    fn test_empty_table_name_rejected() {
        let m = metadata("", "id", &[]);
        let result = validate_for_shape(&m, RowShape::Plain);
        assert!(matches!(result, Err(Error::Metadata { .. })));
    }

    #[test]
    fn test_empty_key_field_rejected() {
        let m = metadata("users", "", &[]);
        let result = validate_for_shape(&m, RowShape::Plain);
        match result {
            Err(Error::Metadata { table, reason }) => {
                assert_eq!(table, "users");
                assert!(reason.contains("key field"));
            }
            other => panic!("expected Metadata error, got {:?}", other),
        }
    }
}
