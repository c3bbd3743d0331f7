//! Offset pagination shared by list queries.

/// Default page size.
pub const DEFAULT_LIMIT: u32 = 100;

/// Largest page size a caller may request.
pub const MAX_LIMIT: u32 = 100;

/// Offset/limit window with the limit clamped to `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    skip: u32,
    limit: u32,
}

impl Pagination {
    /// Builds a window from optional query values.
    pub fn new(skip: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            skip: skip.unwrap_or(0),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }

    pub fn skip(&self) -> u32 {
        self.skip
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(None, None)
    }
}
