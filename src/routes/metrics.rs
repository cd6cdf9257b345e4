// ABOUTME: Route handlers for recording metric events and querying time series
// ABOUTME: One POST endpoint per metric kind plus a unified range-query endpoint
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric routes
//!
//! Recording endpoints validate the typed event and forward it to the
//! metric adapter. The query endpoint returns observations ascending by
//! timestamp within the requested (or default 30-day) range.
//!
//! The workout-count path uses a hyphen while the other kinds use
//! underscores; existing clients depend on it.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::{DateTime, Utc};
use fittrack_core::errors::AppError;
use fittrack_core::models::{
    BodyWeightMetric, ExerciseMaxMetric, MetricPoint, MetricQuery, WorkoutVolumeMetric,
};
use serde::{Deserialize, Serialize};

use crate::context::ServerResources;
use crate::routes::authenticate;

/// Acknowledgement for a recorded metric event
#[derive(Debug, Serialize, Deserialize)]
pub struct RecordedResponse {
    /// Always `recorded`
    pub status: String,
}

impl RecordedResponse {
    fn new() -> (StatusCode, Json<Self>) {
        (
            StatusCode::CREATED,
            Json(Self {
                status: "recorded".to_owned(),
            }),
        )
    }
}

/// Request body for a workout-count increment
#[derive(Debug, Default, Deserialize)]
pub struct WorkoutCountRequest {
    /// Observation time; defaults to now
    pub timestamp: Option<DateTime<Utc>>,
}

/// One observation in a query response
#[derive(Debug, Serialize, Deserialize)]
pub struct MetricPointResponse {
    /// Observation time
    pub timestamp: String,
    /// Field value
    pub value: f64,
    /// Field name plus contextual tags
    pub metadata: std::collections::BTreeMap<String, String>,
}

impl From<MetricPoint> for MetricPointResponse {
    fn from(point: MetricPoint) -> Self {
        Self {
            timestamp: point.timestamp.to_rfc3339(),
            value: point.value,
            metadata: point.metadata,
        }
    }
}

/// Metric routes handler
pub struct MetricRoutes;

impl MetricRoutes {
    /// Create all metric routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/metrics/body_weight", post(Self::handle_body_weight))
            .route(
                "/api/metrics/workout_volume",
                post(Self::handle_workout_volume),
            )
            .route("/api/metrics/exercise_max", post(Self::handle_exercise_max))
            .route(
                "/api/metrics/workout-count",
                post(Self::handle_workout_count),
            )
            .route("/api/metrics/query", post(Self::handle_query))
            .with_state(resources)
    }

    /// Handle POST /api/metrics/body_weight
    async fn handle_body_weight(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<BodyWeightMetric>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        body.validate()?;
        resources
            .metrics
            .record_body_weight(user.id, body.weight_kg, body.timestamp)
            .await?;
        Ok(RecordedResponse::new().into_response())
    }

    /// Handle POST /api/metrics/workout_volume
    async fn handle_workout_volume(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<WorkoutVolumeMetric>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        body.validate()?;
        resources
            .metrics
            .record_workout_volume(user.id, &body.workout_id, body.total_volume_kg, body.timestamp)
            .await?;
        Ok(RecordedResponse::new().into_response())
    }

    /// Handle POST /api/metrics/exercise_max
    async fn handle_exercise_max(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<ExerciseMaxMetric>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        body.validate()?;
        resources
            .metrics
            .record_exercise_max(
                user.id,
                &body.exercise_id,
                body.max_weight_kg,
                body.reps,
                body.timestamp,
            )
            .await?;
        Ok(RecordedResponse::new().into_response())
    }

    /// Handle POST /api/metrics/workout-count
    async fn handle_workout_count(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Option<Json<WorkoutCountRequest>>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let timestamp = body.and_then(|Json(b)| b.timestamp);
        resources
            .metrics
            .record_workout_count(user.id, timestamp)
            .await?;
        Ok(RecordedResponse::new().into_response())
    }

    /// Handle POST /api/metrics/query
    async fn handle_query(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(query): Json<MetricQuery>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let points = resources.metrics.query(user.id, &query).await?;
        let response: Vec<MetricPointResponse> = points.into_iter().map(Into::into).collect();
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
