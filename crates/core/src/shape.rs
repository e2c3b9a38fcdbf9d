//! Row shape resolution
//!
//! A row on the wire takes one of four shapes. Which one applies is decided
//! once per request from entity metadata, then the codec branches on the
//! closed enum — there is no per-item runtime type inspection downstream.

use crate::metadata::EntityMetadata;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four on-wire row shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RowShape {
    /// Flat plain columns
    Plain,
    /// Flat counter columns
    Counter,
    /// Embedded plain column groups
    EmbeddedGroup,
    /// Embedded counter column groups
    CounterEmbeddedGroup,
}

impl RowShape {
    /// Resolve the shape for the given metadata.
    ///
    /// Pure function: group-shaped iff at least one embedded-group field is
    /// declared, counter variant iff the counter flag is set. No I/O, no
    /// error path — metadata is validated upstream.
    pub fn classify(metadata: &dyn EntityMetadata) -> RowShape {
        match (
            !metadata.embedded_group_fields().is_empty(),
            metadata.is_counter_type(),
        ) {
            (false, false) => RowShape::Plain,
            (false, true) => RowShape::Counter,
            (true, false) => RowShape::EmbeddedGroup,
            (true, true) => RowShape::CounterEmbeddedGroup,
        }
    }

    /// Whether columns of this shape are counters
    pub fn is_counter(self) -> bool {
        matches!(self, RowShape::Counter | RowShape::CounterEmbeddedGroup)
    }

    /// Whether this shape nests columns inside named groups
    pub fn is_grouped(self) -> bool {
        matches!(
            self,
            RowShape::EmbeddedGroup | RowShape::CounterEmbeddedGroup
        )
    }
}

impl fmt::Display for RowShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RowShape::Plain => "plain-column",
            RowShape::Counter => "counter-column",
            RowShape::EmbeddedGroup => "embedded-group",
            RowShape::CounterEmbeddedGroup => "counter-embedded-group",
        };
        write!(f, "{}", name)
    }
}
