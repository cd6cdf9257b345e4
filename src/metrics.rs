// ABOUTME: Metric adapter mapping typed metric events to time-series writes and reads
// ABOUTME: Applies the 30-day default lookback and kind-specific tag filtering on queries
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric event adapter
//!
//! One write operation per metric kind, each producing a single point
//! tagged with the owning user (and the exercise or workout where
//! applicable). The read path resolves the time range, applies tag
//! filters only for the kind they belong to, and surfaces the field name
//! plus `exercise_`/`workout_`-prefixed tags as metadata.
//!
//! Writes are at-most-once from this adapter's perspective: store
//! failures propagate as transport errors, with no retry or buffering.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use fittrack_core::errors::AppResult;
use fittrack_core::models::{MetricKind, MetricPoint, MetricQuery};
use uuid::Uuid;

use crate::tsdb::{Point, ReadQuery, TimeSeriesStore};

/// Default lookback window when a query supplies no range start
pub const DEFAULT_LOOKBACK_DAYS: i64 = 30;

/// Adapter between typed metric events and the time-series store
#[derive(Clone)]
pub struct MetricsService {
    store: Arc<dyn TimeSeriesStore>,
    bucket: String,
}

impl MetricsService {
    /// Create the adapter over a store and bucket
    pub fn new(store: Arc<dyn TimeSeriesStore>, bucket: impl Into<String>) -> Self {
        Self {
            store,
            bucket: bucket.into(),
        }
    }

    /// Record a body weight observation
    ///
    /// # Errors
    ///
    /// Propagates store write failures.
    pub async fn record_body_weight(
        &self,
        user_id: Uuid,
        weight_kg: f64,
        timestamp: DateTime<Utc>,
    ) -> AppResult<()> {
        let point = Point::new(MetricKind::BodyWeight.measurement())
            .tag("user_id", user_id.to_string())
            .field("weight", weight_kg)
            .timestamp(timestamp);
        self.store.write(&self.bucket, point).await
    }

    /// Record the total volume lifted in one workout
    ///
    /// # Errors
    ///
    /// Propagates store write failures.
    pub async fn record_workout_volume(
        &self,
        user_id: Uuid,
        workout_id: &str,
        total_volume_kg: f64,
        timestamp: DateTime<Utc>,
    ) -> AppResult<()> {
        let point = Point::new(MetricKind::WorkoutVolume.measurement())
            .tag("user_id", user_id.to_string())
            .tag("workout_id", workout_id)
            .field("volume", total_volume_kg)
            .timestamp(timestamp);
        self.store.write(&self.bucket, point).await
    }

    /// Record a per-exercise maximum weight observation
    ///
    /// # Errors
    ///
    /// Propagates store write failures.
    pub async fn record_exercise_max(
        &self,
        user_id: Uuid,
        exercise_id: &str,
        max_weight_kg: f64,
        reps: u32,
        timestamp: DateTime<Utc>,
    ) -> AppResult<()> {
        let point = Point::new(MetricKind::ExerciseMax.measurement())
            .tag("user_id", user_id.to_string())
            .tag("exercise_id", exercise_id)
            .field("max_weight", max_weight_kg)
            .field("reps", f64::from(reps))
            .timestamp(timestamp);
        self.store.write(&self.bucket, point).await
    }

    /// Record one workout-count increment
    ///
    /// Each call is one event with `count = 1`; summing into a frequency
    /// total is downstream aggregation, not this adapter's concern.
    ///
    /// # Errors
    ///
    /// Propagates store write failures.
    pub async fn record_workout_count(
        &self,
        user_id: Uuid,
        timestamp: Option<DateTime<Utc>>,
    ) -> AppResult<()> {
        let point = Point::new(MetricKind::WorkoutCount.measurement())
            .tag("user_id", user_id.to_string())
            .field("count", 1.0)
            .timestamp(timestamp.unwrap_or_else(Utc::now));
        self.store.write(&self.bucket, point).await
    }

    /// Query metric observations for one user, ascending by timestamp
    ///
    /// Tag filters apply only to the kind they belong to: `exercise_id`
    /// for `exercise_max`, `workout_id` for `workout_volume`. A filter
    /// supplied for any other kind is ignored, guarding against
    /// cross-kind tag leakage.
    ///
    /// # Errors
    ///
    /// Propagates store read failures.
    pub async fn query(&self, user_id: Uuid, query: &MetricQuery) -> AppResult<Vec<MetricPoint>> {
        let (start, end) = Self::resolve_range(query.start, query.end);

        let mut tags = BTreeMap::from([("user_id".to_owned(), user_id.to_string())]);
        match query.metric_kind {
            MetricKind::ExerciseMax => {
                if let Some(exercise_id) = &query.exercise_id {
                    tags.insert("exercise_id".to_owned(), exercise_id.clone());
                }
            }
            MetricKind::WorkoutVolume => {
                if let Some(workout_id) = &query.workout_id {
                    tags.insert("workout_id".to_owned(), workout_id.clone());
                }
            }
            MetricKind::BodyWeight | MetricKind::WorkoutCount => {}
        }

        let records = self
            .store
            .query(
                &self.bucket,
                &ReadQuery {
                    measurement: query.metric_kind.measurement().to_owned(),
                    start,
                    end,
                    tags,
                },
            )
            .await?;

        Ok(records
            .into_iter()
            .map(|record| {
                let mut metadata = BTreeMap::from([("field".to_owned(), record.field)]);
                for (key, value) in record.tags {
                    if key.starts_with("exercise_") || key.starts_with("workout_") {
                        metadata.insert(key, value);
                    }
                }
                MetricPoint {
                    timestamp: record.timestamp,
                    value: record.value,
                    metadata,
                }
            })
            .collect())
    }

    /// Resolve the effective time range for a query
    ///
    /// With a start the range is `[start, end]` (open-ended upward when
    /// `end` is absent). Without one the range is the last
    /// [`DEFAULT_LOOKBACK_DAYS`] days ending now, so future-dated points
    /// stay out of default queries; a supplied `end` is ignored in that
    /// case.
    #[must_use]
    pub fn resolve_range(
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> (DateTime<Utc>, Option<DateTime<Utc>>) {
        match start {
            Some(start) => (start, end),
            None => {
                let now = Utc::now();
                (now - Duration::days(DEFAULT_LOOKBACK_DAYS), Some(now))
            }
        }
    }
}
