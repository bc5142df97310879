//! Query - Fetch Query and Result Types
//!
//! The client-observable paging contract with the remote record source.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_PAGE_SIZE;
use crate::error::{Error, Result};

/// Sort direction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// The opposite direction
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Parameters of a single page request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchQuery {
    /// 1-based page number
    pub page: u32,
    /// Page size, always > 0
    pub limit: u32,
    /// Free-text search
    #[serde(default)]
    pub search: String,
    /// Server-side filters
    #[serde(default)]
    pub filters: BTreeMap<String, serde_json::Value>,
    /// Sort field wire name
    #[serde(default)]
    pub sort_by: Option<String>,
    /// Sort direction
    #[serde(default)]
    pub sort_order: SortOrder,
}

impl Default for FetchQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            search: String::new(),
            filters: BTreeMap::new(),
            sort_by: None,
            sort_order: SortOrder::Desc,
        }
    }
}

impl FetchQuery {
    /// First page with the given page size
    pub fn new(limit: u32) -> Result<Self> {
        let query = Self {
            limit,
            ..Default::default()
        };
        query.validate()?;
        Ok(query)
    }

    /// Check `page >= 1` and `limit > 0`
    pub fn validate(&self) -> Result<()> {
        if self.page == 0 {
            return Err(Error::Invalid {
                message: "invalid query: page must be >= 1".to_string(),
            });
        }
        if self.limit == 0 {
            return Err(Error::Invalid {
                message: "invalid query: limit must be > 0".to_string(),
            });
        }
        Ok(())
    }

    /// Same query on another page
    pub fn with_page(&self, page: u32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// True when search text or any filter narrows the result
    pub fn is_narrowed(&self) -> bool {
        !self.search.trim().is_empty() || !self.filters.is_empty()
    }
}

/// One page of records returned by the source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResult<R> {
    /// Records of this page, in server order
    #[serde(alias = "players")]
    pub records: Vec<R>,
    /// Total matching records on the server
    pub total: u64,
    /// Page these records belong to
    pub page: u32,
    /// Whether another page exists
    #[serde(rename = "hasMore", alias = "has_more")]
    pub has_more: bool,
}

impl<R> FetchResult<R> {
    /// An empty first page
    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            total: 0,
            page: 1,
            has_more: false,
        }
    }
}
