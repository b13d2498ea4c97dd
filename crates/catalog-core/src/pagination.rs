//! Pagination and sort options for list queries

use serde::{Deserialize, Serialize};

use crate::errors::{CatalogError, Result};
use crate::model::CourseField;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(CatalogError::InvalidPagination {
                reason: format!("sortOrder must be 'asc' or 'desc', got '{}'", other),
            }),
        }
    }
}

/// Raw pagination query parameters
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationOptions {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub sort_by: Option<String>,
    pub sort_order: Option<SortOrder>,
}

impl PaginationOptions {
    pub fn page(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
            ..Self::default()
        }
    }

    pub fn sorted(mut self, sort_by: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(sort_by.into());
        self.sort_order = Some(order);
        self
    }
}

/// Resolved pagination window and ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub skip: u64,
    pub sort_by: CourseField,
    pub sort_order: SortOrder,
}

/// Resolve defaults and compute `skip`
///
/// Explicit ordering applies only when both `sort_by` and `sort_order` are
/// given; otherwise results are newest-created first.
pub fn calculate_pagination(options: &PaginationOptions) -> Result<Pagination> {
    let page = options.page.unwrap_or(DEFAULT_PAGE);
    let limit = options.limit.unwrap_or(DEFAULT_LIMIT);

    if page == 0 {
        return Err(CatalogError::InvalidPagination {
            reason: "page starts at 1".to_string(),
        });
    }
    if limit == 0 {
        return Err(CatalogError::InvalidPagination {
            reason: "limit must be positive".to_string(),
        });
    }

    let (sort_by, sort_order) = match (&options.sort_by, options.sort_order) {
        (Some(field), Some(order)) => (CourseField::sortable(field)?, order),
        _ => (CourseField::CreatedAt, SortOrder::Desc),
    };

    Ok(Pagination {
        page,
        limit,
        skip: u64::from(page - 1) * u64::from(limit),
        sort_by,
        sort_order,
    })
}

/// `meta` block of a paginated response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub total: u64,
    pub page: u32,
    pub limit: u32,
}

/// Paginated response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericResponse<T> {
    pub meta: PageMeta,
    pub data: Vec<T>,
}
