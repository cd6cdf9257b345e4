// ABOUTME: In-memory time-series backend for tests and development runs
// ABOUTME: Stores points per bucket and answers range plus tag-filter queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0

use async_trait::async_trait;
use dashmap::DashMap;
use fittrack_core::errors::AppResult;

use super::{Point, ReadQuery, SeriesRecord, TimeSeriesStore};

/// In-memory [`TimeSeriesStore`] backend
///
/// Points are append-only per bucket. Queries flatten each matching
/// point into one record per field.
#[derive(Debug, Default)]
pub struct MemoryTimeSeriesStore {
    buckets: DashMap<String, Vec<Point>>,
}

impl MemoryTimeSeriesStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TimeSeriesStore for MemoryTimeSeriesStore {
    async fn write(&self, bucket: &str, point: Point) -> AppResult<()> {
        self.buckets
            .entry(bucket.to_owned())
            .or_default()
            .push(point);
        Ok(())
    }

    async fn query(&self, bucket: &str, query: &ReadQuery) -> AppResult<Vec<SeriesRecord>> {
        let mut records: Vec<SeriesRecord> =
            self.buckets.get(bucket).map_or_else(Vec::new, |points| {
                points
                    .iter()
                    .filter(|point| {
                        point.measurement == query.measurement
                            && point.timestamp >= query.start
                            && query.end.is_none_or(|end| point.timestamp <= end)
                            && query
                                .tags
                                .iter()
                                .all(|(key, value)| point.tags.get(key) == Some(value))
                    })
                    .flat_map(|point| {
                        point.fields.iter().map(|(field, value)| SeriesRecord {
                            timestamp: point.timestamp,
                            field: field.clone(),
                            value: *value,
                            tags: point.tags.clone(),
                        })
                    })
                    .collect()
            });
        records.sort_by(|a, b| {
            a.timestamp
                .cmp(&b.timestamp)
                .then_with(|| a.field.cmp(&b.field))
        });
        Ok(records)
    }
}
