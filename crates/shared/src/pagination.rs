//! Page-based pagination envelope.

use serde::{Deserialize, Serialize};

/// Default page size for list endpoints.
pub const DEFAULT_PER_PAGE: i64 = 50;

/// Hard cap on page size.
pub const MAX_PER_PAGE: i64 = 100;

/// Query parameters shared by paginated list endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PageQuery {
    /// Requested page, 1-based.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    /// Requested page size, clamped to [1, MAX_PER_PAGE].
    pub fn per_page(&self) -> i64 {
        self.per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, MAX_PER_PAGE)
    }

    /// Row offset for the requested page.
    pub fn offset(&self) -> i64 {
        (self.page() - 1) * self.per_page()
    }
}

/// Pagination metadata returned alongside list data.
#[derive(Debug, Clone, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl Pagination {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        let total_pages = if total == 0 {
            0
        } else {
            (total + per_page - 1) / per_page
        };
        Self {
            page,
            per_page,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_query_defaults() {
        let query = PageQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.per_page(), DEFAULT_PER_PAGE);
        assert_eq!(query.offset(), 0);
    }

    #[test]
    fn test_page_query_clamps_page() {
        let query = PageQuery {
            page: Some(0),
            per_page: None,
        };
        assert_eq!(query.page(), 1);

        let query = PageQuery {
            page: Some(-5),
            per_page: None,
        };
        assert_eq!(query.page(), 1);
    }

    #[test]
    fn test_page_query_clamps_per_page() {
        let query = PageQuery {
            page: None,
            per_page: Some(1000),
        };
        assert_eq!(query.per_page(), MAX_PER_PAGE);

        let query = PageQuery {
            page: None,
            per_page: Some(0),
        };
        assert_eq!(query.per_page(), 1);
    }

    #[test]
    fn test_page_query_offset() {
        let query = PageQuery {
            page: Some(3),
            per_page: Some(20),
        };
        assert_eq!(query.offset(), 40);
    }

    #[test]
    fn test_pagination_total_pages() {
        let p = Pagination::new(1, 50, 0);
        assert_eq!(p.total_pages, 0);

        let p = Pagination::new(1, 50, 50);
        assert_eq!(p.total_pages, 1);

        let p = Pagination::new(1, 50, 51);
        assert_eq!(p.total_pages, 2);

        let p = Pagination::new(2, 10, 95);
        assert_eq!(p.total_pages, 10);
    }
}
