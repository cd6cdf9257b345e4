// ABOUTME: Time-series store abstraction consumed by the metric adapter
// ABOUTME: Points carry measurement, tags, fields, and a timestamp; queries are range plus tag filters
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Time-series store abstraction
//!
//! The metric adapter writes [`Point`]s and reads [`SeriesRecord`]s
//! through this trait. A point is one timestamped observation: tags are
//! indexed dimensions, fields are values. Reads return one record per
//! point field, sorted ascending by timestamp.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fittrack_core::errors::AppResult;

pub mod memory;

pub use memory::MemoryTimeSeriesStore;

/// One timestamped observation to write
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Measurement the point belongs to
    pub measurement: String,
    /// Indexed dimensions
    pub tags: BTreeMap<String, String>,
    /// Observed values
    pub fields: BTreeMap<String, f64>,
    /// Observation time
    pub timestamp: DateTime<Utc>,
}

impl Point {
    /// Start a point for a measurement, timestamped now
    #[must_use]
    pub fn new(measurement: impl Into<String>) -> Self {
        Self {
            measurement: measurement.into(),
            tags: BTreeMap::new(),
            fields: BTreeMap::new(),
            timestamp: Utc::now(),
        }
    }

    /// Attach a tag
    #[must_use]
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    /// Attach a field value
    #[must_use]
    pub fn field(mut self, key: impl Into<String>, value: f64) -> Self {
        self.fields.insert(key.into(), value);
        self
    }

    /// Set the observation time
    #[must_use]
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }
}

/// A range plus tag-filter read against one measurement
#[derive(Debug, Clone)]
pub struct ReadQuery {
    /// Measurement to read
    pub measurement: String,
    /// Inclusive range start
    pub start: DateTime<Utc>,
    /// Inclusive range end; open-ended upward when absent
    pub end: Option<DateTime<Utc>>,
    /// Tag equality filters, all ANDed
    pub tags: BTreeMap<String, String>,
}

/// One record returned by a read: a single field of a single point
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesRecord {
    /// Observation time
    pub timestamp: DateTime<Utc>,
    /// Field name
    pub field: String,
    /// Field value
    pub value: f64,
    /// Tags of the originating point
    pub tags: BTreeMap<String, String>,
}

/// Contract every time-series backend implements
///
/// Writes are fire-and-forget at-most-once from the caller's
/// perspective; durability is the store's concern. Failures propagate
/// as transport errors with no retry or buffering here.
#[async_trait]
pub trait TimeSeriesStore: Send + Sync {
    /// Append one point to a bucket
    async fn write(&self, bucket: &str, point: Point) -> AppResult<()>;

    /// Read records matching the query, sorted ascending by timestamp
    async fn query(&self, bucket: &str, query: &ReadQuery) -> AppResult<Vec<SeriesRecord>>;
}
