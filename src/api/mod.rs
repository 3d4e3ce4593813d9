//! Resource clients for the marketplace API.
//!
//! One module per resource, all flowing through the query cache and the
//! shared transport.

mod auth;
mod brands;
mod cars;
mod enquiries;
mod requests;

pub use auth::*;
pub use brands::*;
pub use cars::*;
pub use enquiries::*;
pub use requests::*;

use serde::{Deserialize, Serialize};

use crate::models::Car;

/// Parameters shared by every paginated list read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListParams {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
}

impl Default for ListParams {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            search: None,
        }
    }
}

impl ListParams {
    /// Canonical form used as the parameter half of a cache key.
    pub fn cache_key(&self) -> String {
        match &self.search {
            Some(term) => format!("page={}&limit={}&search={}", self.page, self.limit, term),
            None => format!("page={}&limit={}", self.page, self.limit),
        }
    }

    /// Query pairs for the HTTP request.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        if let Some(term) = &self.search {
            pairs.push(("search", term.clone()));
        }
        pairs
    }
}

/// Standard list envelope: `{data, total, page, totalPages}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page")]
    pub total_pages: u32,
}

fn default_page() -> u32 {
    1
}

/// Pagination block of the car list envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub total: u64,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_page")]
    pub total_pages: u32,
}

/// Car list envelope: `{cars, pagination}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarPage {
    pub cars: Vec<Car>,
    pub pagination: Pagination,
}

/// Unpaginated list envelope: `{data}` (per-brand model dropdowns).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataList<T> {
    #[serde(default)]
    pub data: Vec<T>,
}

/// Common view over the two paginated envelope shapes, for the list pager.
pub trait Paged {
    type Item;

    fn items(&self) -> &[Self::Item];
    fn page(&self) -> u32;
    fn total_pages(&self) -> u32;
    fn total(&self) -> u64;
}

impl<T> Paged for Page<T> {
    type Item = T;

    fn items(&self) -> &[T] {
        &self.data
    }

    fn page(&self) -> u32 {
        self.page
    }

    fn total_pages(&self) -> u32 {
        self.total_pages
    }

    fn total(&self) -> u64 {
        self.total
    }
}

impl Paged for CarPage {
    type Item = Car;

    fn items(&self) -> &[Car] {
        &self.cars
    }

    fn page(&self) -> u32 {
        self.pagination.page
    }

    fn total_pages(&self) -> u32 {
        self.pagination.total_pages
    }

    fn total(&self) -> u64 {
        self.pagination.total
    }
}
