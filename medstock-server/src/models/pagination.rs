//! Pagination types
//!
//! Pages are 1-indexed. `offset = (page - 1) * limit`, and the derived
//! navigation flags follow `total_pages = ceil(total_items / limit)`.

use serde::{Deserialize, Serialize};

use super::ValidationError;

/// Default items per page
pub const DEFAULT_LIMIT: u32 = 10;

/// Largest row offset any backend accepts (`OFFSET` is a bigint)
const MAX_OFFSET: u64 = i64::MAX as u64;

/// Validated page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (1-indexed)
    pub page: u32,
    /// Items per page
    pub limit: u32,
}

impl Pagination {
    /// Create pagination, rejecting a zero page or limit and any page whose
    /// offset would not fit a signed 64-bit SQL parameter.
    pub fn new(page: u32, limit: u32) -> Result<Self, ValidationError> {
        if page < 1 {
            return Err(ValidationError::NotPositive {
                field: "page",
                value: page.to_string(),
            });
        }
        if limit < 1 {
            return Err(ValidationError::NotPositive {
                field: "limit",
                value: limit.to_string(),
            });
        }
        let max_page = MAX_OFFSET / u64::from(limit) + 1;
        if u64::from(page) > max_page {
            return Err(ValidationError::TooLarge {
                field: "page",
                max: max_page,
            });
        }
        Ok(Self { page, limit })
    }

    /// Number of rows to skip.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    pub fn limit(&self) -> u64 {
        u64::from(self.limit)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Query parameters for `GET /medications`
///
/// Kept as raw strings so a malformed number becomes a 400 with a
/// readable message instead of an extractor rejection.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    pub name: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Parsed list query: optional name search plus a page window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    pub search: Option<String>,
    pub page: Pagination,
}

impl ListQuery {
    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }
}

impl TryFrom<ListParams> for ListQuery {
    type Error = ValidationError;

    fn try_from(params: ListParams) -> Result<Self, Self::Error> {
        let page = parse_positive("page", params.page.as_deref(), 1)?;
        let limit = parse_positive("limit", params.limit.as_deref(), DEFAULT_LIMIT)?;

        Ok(Self {
            search: params.name.filter(|name| !name.is_empty()),
            page: Pagination::new(page, limit)?,
        })
    }
}

fn parse_positive(field: &'static str, raw: Option<&str>, default: u32) -> Result<u32, ValidationError> {
    let raw = match raw.map(str::trim) {
        None | Some("") => return Ok(default),
        Some(raw) => raw,
    };

    match raw.parse::<u64>() {
        Ok(n) if n >= 1 => u32::try_from(n).map_err(|_| ValidationError::TooLarge {
            field,
            max: u64::from(u32::MAX),
        }),
        _ => Err(ValidationError::NotPositive {
            field,
            value: raw.to_owned(),
        }),
    }
}

/// Navigation block returned alongside a page of items
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub current_page: u32,
    pub total_pages: u64,
    pub total_items: u64,
    pub items_per_page: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

impl PageInfo {
    pub fn new(page: Pagination, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(page.limit());
        Self {
            current_page: page.page,
            total_pages,
            total_items,
            items_per_page: page.limit,
            has_next_page: u64::from(page.page) < total_pages,
            has_prev_page: page.page > 1,
        }
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paginated<T> {
    /// Items for current page
    pub data: Vec<T>,
    pub pagination: PageInfo,
}

impl<T> Paginated<T> {
    pub fn new(data: Vec<T>, page: Pagination, total_items: u64) -> Self {
        Self {
            data,
            pagination: PageInfo::new(page, total_items),
        }
    }
}
