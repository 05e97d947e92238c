//! Request/response envelopes shared by every paged entity list

use serde::{Deserialize, Serialize};

/// One active filter: `property` contains `value`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriterion {
    pub property: String,
    pub value: String,
}

/// Paged, sorted, filtered list request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    pub sort_field: String,
    pub ascending: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<FilterCriterion>,
    /// Zero-based page index
    pub page: usize,
    pub page_size: usize,
}

impl ListQuery {
    pub fn new(sort_field: impl Into<String>, ascending: bool, page_size: usize) -> Self {
        Self {
            sort_field: sort_field.into(),
            ascending,
            filters: Vec::new(),
            page: 0,
            page_size,
        }
    }

    /// Same field flips the direction, a new field starts ascending.
    /// Either way paging restarts from the first page.
    pub fn toggle_sort(&mut self, field: &str) {
        if self.sort_field == field {
            self.ascending = !self.ascending;
        } else {
            self.sort_field = field.to_string();
            self.ascending = true;
        }
        self.page = 0;
    }

    /// Replaces the filter set; blank values are dropped
    pub fn set_filters(&mut self, filters: Vec<FilterCriterion>) {
        self.filters = filters
            .into_iter()
            .filter(|f| !f.value.trim().is_empty())
            .collect();
        self.page = 0;
    }

    pub fn offset(&self) -> usize {
        self.page * self.page_size
    }
}

/// One page of a list response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage<T> {
    pub items: Vec<T>,
    pub total_count: usize,
}

impl<T> ListPage<T> {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total_count: 0,
        }
    }

    pub fn total_pages(&self, page_size: usize) -> usize {
        if page_size == 0 {
            return 0;
        }
        self.total_count.div_ceil(page_size)
    }
}

/// Bulk delete payload; all-or-nothing from the client's point of view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteRequest {
    pub ids: Vec<String>,
}
