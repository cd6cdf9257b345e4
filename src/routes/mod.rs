// ABOUTME: HTTP route handlers grouped by resource, composed into one axum Router
// ABOUTME: Shared bearer-token authentication helper lives here
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP routes
//!
//! Each resource gets a `XxxRoutes` struct with a `routes` constructor;
//! [`router`] composes them with tracing and CORS layers. Protected
//! handlers call [`authenticate`] to resolve the bearer token to a user.

/// Exercise CRUD endpoints
pub mod exercises;
/// Health check endpoint
pub mod health;
/// Metric recording and query endpoints
pub mod metrics;
/// Registration, login, and profile endpoints
pub mod users;
/// Workout CRUD endpoints
pub mod workouts;

use std::sync::Arc;

use axum::http::HeaderMap;
use axum::Router;
use fittrack_core::errors::{AppError, AppResult};
use fittrack_core::models::User;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::AuthManager;
use crate::context::ServerResources;

pub use exercises::ExerciseRoutes;
pub use health::HealthRoutes;
pub use metrics::MetricRoutes;
pub use users::UserRoutes;
pub use workouts::WorkoutRoutes;

/// Compose the full application router
#[must_use]
pub fn router(resources: Arc<ServerResources>) -> Router {
    Router::new()
        .merge(HealthRoutes::routes())
        .merge(UserRoutes::routes(resources.clone()))
        .merge(ExerciseRoutes::routes(resources.clone()))
        .merge(WorkoutRoutes::routes(resources.clone()))
        .merge(MetricRoutes::routes(resources))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Resolve the `Authorization: Bearer` header to the authenticated user
///
/// A missing header is an auth-required error; everything else that goes
/// wrong (malformed header, bad token, unknown user) collapses into the
/// uniform credential error.
///
/// # Errors
///
/// Returns a 401-mapped error when authentication fails.
pub async fn authenticate(
    headers: &HeaderMap,
    resources: &Arc<ServerResources>,
) -> AppResult<User> {
    let header = headers
        .get("authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(AppError::auth_required)?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(AuthManager::credentials_error)?;

    let claims = resources.auth.validate_token(token)?;
    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthManager::credentials_error())?;

    resources
        .users
        .get(user_id)
        .await?
        .ok_or_else(AuthManager::credentials_error)
}
