// ABOUTME: Route handlers for user registration, login, and the profile endpoint
// ABOUTME: Responses never carry the password hash
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User routes
//!
//! Registration and login are public; `/api/users/me` requires a bearer
//! token.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use fittrack_core::errors::AppError;
use fittrack_core::models::User;
use serde::{Deserialize, Serialize};

use crate::context::ServerResources;
use crate::routes::authenticate;
use crate::services::{LoginRequest, RegisterRequest};

/// Public view of a user account
#[derive(Debug, Serialize, Deserialize)]
pub struct UserResponse {
    /// Unique identifier
    pub id: String,
    /// Email address
    pub email: String,
    /// Display name
    pub name: String,
    /// Baseline body weight in kilograms
    pub initial_weight_kg: Option<f64>,
    /// Height in centimeters
    pub height_cm: Option<f64>,
    /// Registration timestamp
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            name: user.name,
            initial_weight_kg: user.initial_weight_kg,
            height_cm: user.height_cm,
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

/// Response for a successful login
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    /// Bearer token for subsequent requests
    pub access_token: String,
    /// Always `bearer`
    pub token_type: String,
}

/// User routes handler
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes
    #[must_use]
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/users/register", post(Self::handle_register))
            .route("/api/users/login", post(Self::handle_login))
            .route("/api/users/me", get(Self::handle_me))
            .with_state(resources)
    }

    /// Handle POST /api/users/register
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let user = resources.users.register(body).await?;
        let response: UserResponse = user.into();
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle POST /api/users/login
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        Json(body): Json<LoginRequest>,
    ) -> Result<Response, AppError> {
        let (_, token) = resources.users.login(body).await?;
        let response = TokenResponse {
            access_token: token,
            token_type: "bearer".to_owned(),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /api/users/me
    async fn handle_me(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
    ) -> Result<Response, AppError> {
        let user = authenticate(&headers, &resources).await?;
        let response: UserResponse = user.into();
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
