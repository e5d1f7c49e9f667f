use serde::Deserialize;
use thiserror::Error;

use crate::config::PagingConfig;

pub mod sort;

pub use sort::{SortDirection, SortField, SortSpec};

/// Raw page parameters as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<u32>,
    pub size: Option<u32>,
    /// Spring-style token: `field` or `field,direction`
    pub sort: Option<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("page size must be at least 1")]
    ZeroSize,

    #[error("unsupported sort field: {0}")]
    UnsupportedSortField(String),

    #[error("invalid sort direction: {0}")]
    InvalidSortDirection(String),

    #[error("empty sort specification")]
    EmptySort,
}

/// Validated paging request: zero-based page index, bounded size, sort spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
    pub sort: SortSpec,
}

impl PageRequest {
    /// Apply defaults and bounds: page 0, configured default size, ascending
    /// amount. An explicit size of 0 is rejected; oversized requests are
    /// clamped to the configured maximum.
    pub fn from_query(query: &PageQuery, paging: &PagingConfig) -> Result<Self, PageError> {
        let size = query.size.unwrap_or(paging.default_size);
        if size == 0 {
            return Err(PageError::ZeroSize);
        }
        let size = size.min(paging.max_size);

        let sort = match query.sort.as_deref() {
            Some(raw) => SortSpec::parse(raw)?,
            None => SortSpec::default(),
        };

        Ok(Self {
            page: query.page.unwrap_or(0),
            size,
            sort,
        })
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// One page of records plus whether more pages follow.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub records: Vec<T>,
    pub has_more: bool,
}

impl<T> Page<T> {
    /// Build from an over-fetch of `size + 1` rows: the extra row, if
    /// present, only signals that another page exists.
    pub fn from_overfetch(mut records: Vec<T>, size: usize) -> Self {
        let has_more = records.len() > size;
        records.truncate(size);
        Self { records, has_more }
    }

    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            has_more: false,
        }
    }
}
