// ABOUTME: Route handlers for the exercise CRUD REST API
// ABOUTME: All endpoints require a bearer token; listings support filters and pagination
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Exercise routes

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
    Json, Router,
};
use fittrack_core::errors::AppError;
use fittrack_core::filters::ExerciseFilters;
use fittrack_core::models::{Exercise, ExerciseCategory, ExerciseType};
use fittrack_core::pagination::{Page, PaginationParams};
use serde::{Deserialize, Serialize};

use crate::context::ServerResources;
use crate::routes::authenticate;
use crate::services::{CreateExerciseRequest, UpdateExerciseRequest};

/// Response for an exercise
#[derive(Debug, Serialize, Deserialize)]
pub struct ExerciseResponse {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Muscle group or modality
    pub category: ExerciseCategory,
    /// Training modality
    #[serde(rename = "type")]
    pub exercise_type: ExerciseType,
    /// Creation timestamp
    pub created_at: String,
}

impl From<Exercise> for ExerciseResponse {
    fn from(exercise: Exercise) -> Self {
        Self {
            id: exercise.id.to_string(),
            name: exercise.name,
            description: exercise.description,
            category: exercise.category,
            exercise_type: exercise.exercise_type,
            created_at: exercise.created_at.to_rfc3339(),
        }
    }
}

/// Query parameters for listing exercises
#[derive(Debug, Deserialize, Default)]
pub struct ListExercisesQuery {
    /// Page number, starting at 1
    pub page: Option<u32>,
    /// Items per page
    pub size: Option<u32>,
    /// Case-insensitive substring match against the name
    pub search: Option<String>,
    /// Exact category match
    pub category: Option<ExerciseCategory>,
    /// Exact type match
    #[serde(rename = "type")]
    pub exercise_type: Option<ExerciseType>,
}

/// Exercise routes handler
pub struct ExerciseRoutes;

impl ExerciseRoutes {
    /// Create all exercise routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/exercises", post(Self::handle_create))
            .route("/api/exercises", get(Self::handle_list))
            .route("/api/exercises/:id", get(Self::handle_get))
            .route("/api/exercises/:id", put(Self::handle_update))
            .route("/api/exercises/:id", delete(Self::handle_delete))
            .with_state(resources)
    }

    /// Handle POST /api/exercises
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Json(body): Json<CreateExerciseRequest>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let exercise = resources.exercises.create(user.id, body).await?;
        let response: ExerciseResponse = exercise.into();
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle GET /api/exercises
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Query(query): Query<ListExercisesQuery>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let pagination = PaginationParams::from_query(query.page, query.size)?;
        let filters = ExerciseFilters {
            search: query.search,
            category: query.category,
            exercise_type: query.exercise_type,
        };

        let page = resources
            .exercises
            .list(user.id, &filters, &pagination)
            .await?;
        let response = Page::<ExerciseResponse> {
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

    /// Handle GET /api/exercises/:id
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let exercise = resources.exercises.get(user.id, &id).await?;
        let response: ExerciseResponse = exercise.into();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle PUT /api/exercises/:id
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
        Json(body): Json<UpdateExerciseRequest>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let exercise = resources.exercises.update(user.id, &id, body).await?;
        let response: ExerciseResponse = exercise.into();
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle DELETE /api/exercises/:id
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        Path(id): Path<String>,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        resources.exercises.delete(user.id, &id).await?;
        Ok(StatusCode::NO_CONTENT.into_response())
    }
}
