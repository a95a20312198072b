use poem_openapi::Object;
use serde::{Deserialize, Serialize};
use tracing::error;

pub const DATABASE_NOT_CONFIGURED: &str = "Database not configured";
pub const FAILED_TO_FETCH_ADVOCATES: &str = "Failed to fetch advocates";

#[derive(Object, Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct InternalServerErrorResponse {
    pub error: String,
}

impl InternalServerErrorResponse {
    /// Logs the underlying failure and returns only the public message.
    pub fn new(location: &str, function: &str, step: &str, err: &str, message: &str) -> Self {
        error!(location, function, step, "{}", err);
        Self {
            error: message.to_string(),
        }
    }
}

#[derive(Object, Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
#[oai(rename_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub total_pages: u64,
    pub has_next: bool,
    pub has_prev: bool,
}

impl PaginationInfo {
    pub fn new(page: u64, limit: u64, total: u64) -> Self {
        let total_pages = crate::core::pagination::total_pages(total, limit);
        Self {
            page,
            limit,
            total,
            total_pages,
            has_next: page < total_pages,
            has_prev: page > 1,
        }
    }

    /// 1-based index of the first row on this page, 0 when the page is empty.
    pub fn first_row(&self) -> u64 {
        let start = (self.page - 1).saturating_mul(self.limit);
        if start >= self.total {
            0
        } else {
            start + 1
        }
    }

    pub fn last_row(&self) -> u64 {
        if self.first_row() == 0 {
            return 0;
        }
        self.page.saturating_mul(self.limit).min(self.total)
    }
}

#[cfg(test)]
mod tests {
    use super::PaginationInfo;

    #[test]
    fn test_pagination_info_middle_page() {
        let info = PaginationInfo::new(2, 10, 35);
        assert_eq!(info.total_pages, 4);
        assert!(info.has_next);
        assert!(info.has_prev);
        assert_eq!(info.first_row(), 11);
        assert_eq!(info.last_row(), 20);
    }

    #[test]
    fn test_pagination_info_last_page() {
        let info = PaginationInfo::new(4, 10, 35);
        assert!(!info.has_next);
        assert!(info.has_prev);
        assert_eq!(info.first_row(), 31);
        assert_eq!(info.last_row(), 35);
    }

    #[test]
    fn test_pagination_info_empty() {
        let info = PaginationInfo::new(1, 10, 0);
        assert_eq!(info.total_pages, 0);
        assert!(!info.has_next);
        assert!(!info.has_prev);
        assert_eq!(info.first_row(), 0);
        assert_eq!(info.last_row(), 0);
    }

    #[test]
    fn test_pagination_info_beyond_last_page() {
        let info = PaginationInfo::new(9, 10, 35);
        assert!(!info.has_next);
        assert!(info.has_prev);
        assert_eq!(info.first_row(), 0);
        assert_eq!(info.last_row(), 0);
    }

    #[test]
    fn test_pagination_info_serializes_camel_case() {
        let value = serde_json::to_value(PaginationInfo::new(1, 5, 6)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "page": 1,
                "limit": 5,
                "total": 6,
                "totalPages": 2,
                "hasNext": true,
                "hasPrev": false
            })
        );
    }
}
