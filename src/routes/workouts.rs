// ABOUTME: Route handlers for the workout CRUD REST API
// ABOUTME: Listings sort most recent first and support date and duration range filters
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Workout routes

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use fittrack_core::errors::AppError;
use fittrack_core::filters::WorkoutFilters;
use fittrack_core::models::{Workout, WorkoutExercise};
use fittrack_core::pagination::{Page, PaginationParams};
use serde::{Deserialize, Serialize};

use crate::context::ServerResources;
use crate::routes::authenticate;
use crate::services::{CreateWorkoutRequest, UpdateWorkoutRequest};

/// Response for a workout
#[derive(Debug, Serialize, Deserialize)]
pub struct WorkoutResponse {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// When the workout took place
    pub date: String,
    /// Exercise entries with their sets
    pub exercises: Vec<WorkoutExercise>,
    /// Duration in minutes
    pub duration_minutes: u32,
    /// Optional notes
    pub notes: Option<String>,
    /// Total volume lifted in kilograms
    pub total_volume_kg: f64,
    /// Creation timestamp
    pub created_at: String,
}

impl From<Workout> for WorkoutResponse {
    fn from(workout: Workout) -> Self {
        let total_volume_kg = workout.total_volume_kg();
        Self {
            id: workout.id.to_string(),
            name: workout.name,
            date: workout.date.to_rfc3339(),
            total_volume_kg,
            exercises: workout.exercises,
            duration_minutes: workout.duration_minutes,
            notes: workout.notes,
            created_at: workout.created_at.to_rfc3339(),
        }
    }
}

/// Query parameters for listing workouts
#[derive(Debug, Deserialize, Default)]
pub struct ListWorkoutsQuery {
    /// Page number, starting at 1
    pub page: Option<u32>,
    /// Items per page
    pub size: Option<u32>,
    /// Case-insensitive substring match against the name
    pub search: Option<String>,
    /// Inclusive lower bound on the workout date
    pub date_from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the workout date
    pub date_to: Option<DateTime<Utc>>,
    /// Inclusive lower bound on duration in minutes
    pub duration_min: Option<u32>,
    /// Inclusive upper bound on duration in minutes
    pub duration_max: Option<u32>,
}

/// Workout routes handler
pub struct WorkoutRoutes;

impl WorkoutRoutes {
    /// Create all workout routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/workouts", post(Self::handle_create))
            .route("/api/workouts", get(Self::handle_list))
            .route("/api/workouts/:id", get(Self::handle_get))
            .route("/api/workouts/:id", put(Self::handle_update))
            .route("/api/workouts/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    /// Handle POST /api/workouts
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<CreateWorkoutRequest>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let workout = resources.workouts.create(user.id, body).await?;
        let response: WorkoutResponse = workout.into();
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle GET /api/workouts
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ListWorkoutsQuery>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let pagination = PaginationParams::from_query(query.page, query.size)?;
        let filters = WorkoutFilters {
            search: query.search,
            date_from: query.date_from,
            date_to: query.date_to,
            duration_min: query.duration_min,
            duration_max: query.duration_max,
        };

        let page = resources
            .workouts
            .list(user.id, &filters, &pagination)
            .await?;
        let response = Page::<WorkoutResponse> {
            items: page.items.into_iter().map(Into::into).collect(),
            total: page.total,
            page: page.page,
            page_size: page.page_size,
            total_pages: page.total_pages,
            has_next: page.has_next,
            has_prev: page.has_prev,
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/workouts/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let workout = resources.workouts.get(user.id, &id).await?;
        let response: WorkoutResponse = workout.into();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle PUT /api/workouts/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(body): Json<UpdateWorkoutRequest>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let workout = resources.workouts.update(user.id, &id, body).await?;
        let response: WorkoutResponse = workout.into();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle DELETE /api/workouts/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        resources.workouts.delete(user.id, &id).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
