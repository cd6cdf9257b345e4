// ABOUTME: Document store abstraction consumed by the CRUD services
// ABOUTME: Backends execute backend-neutral predicates; an in-memory backend ships for tests and dev
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Document store abstraction
//!
//! The CRUD layer talks to this trait only. Documents are plain JSON
//! values; identifiers are opaque strings carried in the document's `id`
//! field. A malformed or unknown id simply fails to match, which surfaces
//! as "not found" rather than as a structural error.

use async_trait::async_trait;
use fittrack_core::errors::AppResult;
use fittrack_core::filters::Predicate;
use serde_json::{Map, Value};

pub mod memory;

pub use memory::MemoryDocumentStore;

/// Sort specification for `find`
#[derive(Debug, Clone)]
pub struct SortSpec {
    /// Field to sort by
    pub field: String,
    /// Descending when true
    pub descending: bool,
}

impl SortSpec {
    /// Ascending sort on a field
    #[must_use]
    pub fn ascending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: false,
        }
    }

    /// Descending sort on a field
    #[must_use]
    pub fn descending(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            descending: true,
        }
    }
}

/// Contract every document store backend implements
///
/// Single-document updates and deletes are atomic at the store level;
/// no multi-document transactions exist or are required.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document and return its id (taken from the document's
    /// `id` field, or generated when absent)
    async fn insert(&self, collection: &str, doc: Value) -> AppResult<String>;

    /// Find the first document matching the predicate
    async fn find_one(&self, collection: &str, predicate: &Predicate) -> AppResult<Option<Value>>;

    /// Find documents matching the predicate with optional sort and
    /// skip/limit windowing
    async fn find(
        &self,
        collection: &str,
        predicate: &Predicate,
        sort: Option<&SortSpec>,
        skip: u64,
        limit: Option<u32>,
    ) -> AppResult<Vec<Value>>;

    /// Count documents matching the predicate, ignoring skip/limit
    async fn count(&self, collection: &str, predicate: &Predicate) -> AppResult<u64>;

    /// Apply a field-level `$set`-style update to the first matching
    /// document and return the updated document
    async fn find_one_and_update(
        &self,
        collection: &str,
        predicate: &Predicate,
        set: &Map<String, Value>,
    ) -> AppResult<Option<Value>>;

    /// Delete the first matching document, returning the deleted count
    async fn delete_one(&self, collection: &str, predicate: &Predicate) -> AppResult<u64>;
}
