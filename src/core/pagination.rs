pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 100;

/// Normalized listing parameters taken from the query string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageParams {
    pub page: u64,
    pub limit: u64,
    /// Trimmed search term, `None` when empty or absent.
    pub search: Option<String>,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: None,
        }
    }
}

impl PageParams {
    /// Unparseable numbers fall back to their defaults, out of range
    /// numbers are clamped, so every request gets a valid page.
    pub fn from_query(page: Option<&str>, limit: Option<&str>, search: Option<&str>) -> Self {
        let page = parse_number(page).map_or(DEFAULT_PAGE, |val| val.max(1) as u64);
        let limit = parse_number(limit).map_or(DEFAULT_LIMIT, |val| {
            val.clamp(1, MAX_LIMIT as i64) as u64
        });
        Self {
            page,
            limit,
            search: normalize_search(search),
        }
    }

    /// Capped at the largest value Postgres accepts for `OFFSET`.
    pub fn offset(&self) -> u64 {
        (self.page - 1)
            .saturating_mul(self.limit)
            .min(i64::MAX as u64)
    }
}

pub fn total_pages(total: u64, limit: u64) -> u64 {
    total.div_ceil(limit.max(1))
}

pub fn normalize_search(search: Option<&str>) -> Option<String> {
    search
        .map(str::trim)
        .filter(|term| !term.is_empty())
        .map(|term| term.to_string())
}

fn parse_number(value: Option<&str>) -> Option<i64> {
    let value = value?.trim();
    if value.is_empty() {
        return None;
    }
    value.parse::<i64>().ok()
}
