//! Page ceiling and key limits
//!
//! ## Contract
//!
//! The page ceiling is a hard design constant: a single row read retrieves
//! at most [`ROW_PAGE_LIMIT`] entries (columns or groups). Rows with more
//! entries are silently truncated to the first page; callers requiring full
//! coverage must paginate externally.

/// Hard ceiling on entries retrieved per row read, for both flat-column and
/// group-scoped reads.
pub const ROW_PAGE_LIMIT: usize = 10_000;

/// Limits applied to every fetch
///
/// The defaults are the production values; tests can shrink them to exercise
/// truncation and key-length enforcement without building huge rows.
#[derive(Debug, Clone)]
pub struct FetchLimits {
    /// Maximum entries (columns or groups) per row read
    pub page_limit: usize,

    /// Maximum encoded key length in bytes (default: 1024)
    pub max_key_bytes: usize,
}

impl Default for FetchLimits {
    fn default() -> Self {
        FetchLimits {
            page_limit: ROW_PAGE_LIMIT,
            max_key_bytes: 1024,
        }
    }
}

impl FetchLimits {
    /// Create limits with small values for testing
    pub fn with_small_limits() -> Self {
        FetchLimits {
            page_limit: 4,
            max_key_bytes: 16,
        }
    }
}
