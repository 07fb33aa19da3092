//! Offset-based pagination utilities.

use serde::Deserialize;

/// Default page size when the caller does not provide one.
pub const DEFAULT_LIMIT: u32 = 100;

/// Largest page size accepted from callers.
pub const MAX_LIMIT: u32 = 1000;

/// Offset pagination parameters as received from a query string.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct OffsetParams {
    pub skip: Option<u32>,
    pub limit: Option<u32>,
}

impl OffsetParams {
    /// Returns `(skip, limit)` with defaults applied and the limit clamped to `1..=MAX_LIMIT`.
    pub fn resolve(&self) -> (u32, u32) {
        let skip = self.skip.unwrap_or(0);
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        (skip, limit)
    }
}
