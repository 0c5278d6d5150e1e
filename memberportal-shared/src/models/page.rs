/// Paging types for list endpoints
///
/// List endpoints take `page`, `size`, `sort` and an optional `filter`
/// query parameter and return the total row count in the `X-Total-Count`
/// response header.

use serde::{Deserialize, Serialize};

use crate::ITEMS_PER_PAGE;

/// Name of the header carrying the total row count
pub const TOTAL_COUNT_HEADER: &str = "X-Total-Count";

/// One page of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Rows on this page
    pub items: Vec<T>,

    /// Total rows across all pages
    pub total_count: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total_count: u64) -> Self {
        Self { items, total_count }
    }
}

/// Page request sent as query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Zero-based page index
    pub page: u32,

    /// Rows per page
    pub size: u32,

    /// Sort clauses such as `"login,asc"`
    pub sort: Vec<String>,

    /// Free-text filter
    pub filter: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 0,
            size: ITEMS_PER_PAGE,
            sort: Vec::new(),
            filter: None,
        }
    }
}

impl PageRequest {
    /// Request for a given page with the default size
    pub fn page(page: u32) -> Self {
        Self {
            page,
            ..Default::default()
        }
    }

    /// Adds a sort clause
    pub fn sorted_by(mut self, field: &str, ascending: bool) -> Self {
        let direction = if ascending { "asc" } else { "desc" };
        self.sort.push(format!("{},{}", field, direction));
        self
    }

    /// Sets the free-text filter; blank filters are dropped
    pub fn filtered(mut self, filter: impl Into<String>) -> Self {
        let filter = filter.into();
        self.filter = if filter.trim().is_empty() {
            None
        } else {
            Some(filter)
        };
        self
    }

    /// Query parameters in wire order
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("page".to_string(), self.page.to_string()),
            ("size".to_string(), self.size.to_string()),
        ];
        params.extend(self.sort.iter().map(|s| ("sort".to_string(), s.clone())));
        if let Some(filter) = &self.filter {
            params.push(("filter".to_string(), filter.clone()));
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request() {
        let req = PageRequest::default();
        assert_eq!(
            req.to_query(),
            vec![
                ("page".to_string(), "0".to_string()),
                ("size".to_string(), "20".to_string()),
            ]
        );
    }

    #[test]
    fn test_sort_and_filter() {
        let req = PageRequest::page(2)
            .sorted_by("login", true)
            .sorted_by("id", false)
            .filtered("jane");

        let query = req.to_query();
        assert!(query.contains(&("sort".to_string(), "login,asc".to_string())));
        assert!(query.contains(&("sort".to_string(), "id,desc".to_string())));
        assert!(query.contains(&("filter".to_string(), "jane".to_string())));
        assert_eq!(query[0].1, "2");
    }

    #[test]
    fn test_blank_filter_dropped() {
        let req = PageRequest::default().filtered("   ");
        assert!(req.filter.is_none());
    }
}
