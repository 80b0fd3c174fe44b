use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// One-based page coordinates. Both values are always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    page_size: i64,
}

impl PageRequest {
    /// Non-positive values fall back to the defaults.
    pub fn new(page: i64, page_size: i64) -> Self {
        Self {
            page: if page > 0 { page } else { DEFAULT_PAGE },
            page_size: if page_size > 0 {
                page_size
            } else {
                DEFAULT_PAGE_SIZE
            },
        }
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_PAGE_SIZE)
    }
}

/// Raw `?page=&pageSize=` query. Values that are missing, unparseable or
/// non-positive are replaced by the defaults instead of rejecting the request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

impl From<PaginationQuery> for PageRequest {
    fn from(value: PaginationQuery) -> Self {
        let parse = |raw: Option<String>, default: i64| {
            raw.and_then(|v| v.trim().parse::<i64>().ok())
                .unwrap_or(default)
        };

        PageRequest::new(
            parse(value.page, DEFAULT_PAGE),
            parse(value.page_size, DEFAULT_PAGE_SIZE),
        )
    }
}

/// A bounded slice of an ordered result set plus the total number of rows
/// matching the same filter. The count comes from a separate query and may
/// disagree with `items` under concurrent writes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    pub total_count: i64,
    pub items: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(total_count: i64, items: Vec<T>) -> Self {
        Self { total_count, items }
    }

    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            total_count: self.total_count,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}
