// ABOUTME: Offset pagination module converting page/size requests into skip/limit pairs
// ABOUTME: Provides the generic paginated envelope with total/has_next/has_prev metadata
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult, FieldError};

/// Default page number when the caller supplies none
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size when the caller supplies none
pub const DEFAULT_SIZE: u32 = 10;

/// Maximum allowed page size
pub const MAX_SIZE: u32 = 100;

/// Validated pagination parameters for offset-based queries
///
/// Out-of-range values are rejected at construction, never clamped.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PaginationParams {
    /// Page number, starting at 1
    page: u32,
    /// Items per page, in `[1, 100]`
    size: u32,
}

impl PaginationParams {
    /// Create validated pagination parameters
    ///
    /// # Errors
    ///
    /// Returns a validation error with per-field details when `page < 1`
    /// or `size` is outside `[1, 100]`.
    pub fn new(page: u32, size: u32) -> AppResult<Self> {
        let mut details = Vec::new();
        if page < 1 {
            details.push(FieldError::new("page", "must be at least 1"));
        }
        if size < 1 || size > MAX_SIZE {
            details.push(FieldError::new(
                "size",
                format!("must be between 1 and {MAX_SIZE}"),
            ));
        }
        if details.is_empty() {
            Ok(Self { page, size })
        } else {
            Err(AppError::validation(details))
        }
    }

    /// Build parameters from optional query values, applying defaults
    ///
    /// # Errors
    ///
    /// Returns a validation error when a supplied value is out of range.
    pub fn from_query(page: Option<u32>, size: Option<u32>) -> AppResult<Self> {
        Self::new(page.unwrap_or(DEFAULT_PAGE), size.unwrap_or(DEFAULT_SIZE))
    }

    /// Page number, starting at 1
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Items per page
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Number of items to skip before the first item of this page
    #[must_use]
    pub const fn skip(&self) -> u64 {
        (self.page as u64 - 1) * self.size as u64
    }

    /// Maximum number of items to return
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.size
    }
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_SIZE,
        }
    }
}

/// Paginated response envelope, generic over the item type
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items in this page
    pub items: Vec<T>,
    /// Total items matching the query, ignoring skip/limit
    pub total: u64,
    /// Current page number
    pub page: u32,
    /// Items per page
    pub page_size: u32,
    /// Total number of pages (0 when `total` is 0)
    pub total_pages: u32,
    /// Whether a page exists after this one
    pub has_next: bool,
    /// Whether a page exists before this one
    pub has_prev: bool,
}

impl<T> Page<T> {
    /// Build the envelope from a fetched page of items and the total count
    ///
    /// Pure function: `total_pages = ceil(total / size)` (0 when empty),
    /// `has_next = page < total_pages`, `has_prev = page > 1`. A single
    /// page has neither next nor prev.
    #[must_use]
    pub fn build(items: Vec<T>, total: u64, params: &PaginationParams) -> Self {
        let size = u64::from(params.size());
        let total_pages = if total == 0 {
            0
        } else {
            u32::try_from(total.div_ceil(size)).unwrap_or(u32::MAX)
        };
        Self {
            items,
            total,
            page: params.page(),
            page_size: params.size(),
            total_pages,
            has_next: params.page() < total_pages,
            has_prev: params.page() > 1,
        }
    }
}
