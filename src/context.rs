// ABOUTME: Shared server resources container wiring config, auth, services, and stores
// ABOUTME: Built once at startup and passed to every route as Arc state
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Server resources
//!
//! The single dependency-injection point. Every collaborator is
//! constructed here from the config and the two store handles; handlers
//! receive the whole container as axum state and nothing reaches for
//! globals.

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::metrics::MetricsService;
use crate::services::{ExerciseService, UserService, WorkoutService};
use crate::store::DocumentStore;
use crate::tsdb::TimeSeriesStore;

/// Shared resources for all route handlers
pub struct ServerResources {
    /// Server configuration
    pub config: ServerConfig,
    /// Token issuing and validation
    pub auth: Arc<AuthManager>,
    /// User accounts
    pub users: UserService,
    /// Exercise CRUD
    pub exercises: ExerciseService,
    /// Workout CRUD with metric emission
    pub workouts: WorkoutService,
    /// Metric adapter for direct metric endpoints
    pub metrics: MetricsService,
}

impl ServerResources {
    /// Wire all services from the config and store backends
    #[must_use]
    pub fn new(
        config: ServerConfig,
        documents: Arc<dyn DocumentStore>,
        timeseries: Arc<dyn TimeSeriesStore>,
    ) -> Self {
        let auth = Arc::new(AuthManager::new(
            config.jwt_secret.as_bytes(),
            config.token_expiry_hours,
        ));
        let metrics = MetricsService::new(timeseries, config.metrics_bucket.clone());
        Self {
            auth: auth.clone(),
            users: UserService::new(documents.clone(), auth),
            exercises: ExerciseService::new(documents.clone()),
            workouts: WorkoutService::new(documents, metrics.clone()),
            metrics,
            config,
        }
    }
}
