pub mod admin;
pub mod protected;
pub mod public;

use serde::Deserialize;

use crate::config;

/// Common limit/offset query parameters for the larger list endpoints
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListQuery {
    /// Resolve against configured page sizes: default when absent, clamped
    /// to the configured maximum.
    pub fn page(&self) -> (i64, i64) {
        let api = &config::config().api;
        let limit = self.limit.unwrap_or(api.default_page_size).clamp(1, api.max_page_size);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_clamps_limit_and_offset() {
        let (limit, offset) = ListQuery { limit: Some(1_000_000), offset: Some(-5) }.page();
        assert_eq!(limit, crate::config::config().api.max_page_size);
        assert_eq!(offset, 0);

        let (limit, offset) = ListQuery::default().page();
        assert_eq!(limit, crate::config::config().api.default_page_size);
        assert_eq!(offset, 0);
    }
}
