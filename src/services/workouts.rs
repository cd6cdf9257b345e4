// ABOUTME: Workout CRUD service with owner scoping and best-effort metric emission
// ABOUTME: Creating a workout spawns fire-and-forget count and volume metric writes
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Workout service
//!
//! Mirrors the exercise service for CRUD, plus two side effects on
//! create: a workout-count increment and a workout-volume observation.
//! Both are emitted after the insert succeeds, in a detached task, so a
//! time-series outage never fails the workout write. Failures are logged
//! at WARN and otherwise dropped.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use fittrack_core::errors::{AppError, AppResult, FieldError};
use fittrack_core::filters::{Predicate, WorkoutFilters};
use fittrack_core::models::{Workout, WorkoutExercise};
use fittrack_core::pagination::{Page, PaginationParams};
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::warn;
use uuid::Uuid;

use crate::metrics::MetricsService;
use crate::store::{DocumentStore, SortSpec};

const WORKOUTS: &str = "workouts";
const RESOURCE: &str = "Workout";

/// Request body for creating a workout
#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorkoutRequest {
    /// Display name; must not be empty
    pub name: String,
    /// When the workout took place; defaults to now
    pub date: Option<DateTime<Utc>>,
    /// Exercise entries; must be non-empty, each with non-empty sets
    pub exercises: Vec<WorkoutExercise>,
    /// Duration in minutes, at least 1
    pub duration_minutes: u32,
    /// Optional free-text notes
    pub notes: Option<String>,
}

impl CreateWorkoutRequest {
    /// Validate all fields, collecting every violation
    ///
    /// # Errors
    ///
    /// Returns a validation error listing each failing field.
    pub fn validate(&self) -> AppResult<()> {
        let mut details = Vec::new();
        if self.name.trim().is_empty() {
            details.push(FieldError::new("name", "must not be empty"));
        }
        if self.duration_minutes < 1 {
            details.push(FieldError::new("duration_minutes", "must be at least 1"));
        }
        validate_exercises(&self.exercises, &mut details);
        if details.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(details))
        }
    }
}

/// Request body for partially updating a workout
///
/// Absent fields are left untouched; an all-absent request updates
/// nothing and the operation reports not found.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWorkoutRequest {
    /// New name, if provided
    pub name: Option<String>,
    /// New date, if provided
    pub date: Option<DateTime<Utc>>,
    /// Replacement exercise entries, if provided
    pub exercises: Option<Vec<WorkoutExercise>>,
    /// New duration, if provided
    pub duration_minutes: Option<u32>,
    /// New notes, if provided
    pub notes: Option<String>,
}

impl UpdateWorkoutRequest {
    /// Validate the fields that are present
    ///
    /// # Errors
    ///
    /// Returns a validation error listing each failing field.
    pub fn validate(&self) -> AppResult<()> {
        let mut details = Vec::new();
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                details.push(FieldError::new("name", "must not be empty"));
            }
        }
        if let Some(duration) = self.duration_minutes {
            if duration < 1 {
                details.push(FieldError::new("duration_minutes", "must be at least 1"));
            }
        }
        if let Some(exercises) = &self.exercises {
            validate_exercises(exercises, &mut details);
        }
        if details.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(details))
        }
    }

    /// Build the field-level update map from the present fields only
    fn to_set_map(&self) -> AppResult<Map<String, Value>> {
        let mut set = Map::new();
        if let Some(name) = &self.name {
            set.insert("name".to_owned(), Value::String(name.clone()));
        }
        if let Some(date) = self.date {
            set.insert("date".to_owned(), Value::String(date.to_rfc3339()));
        }
        if let Some(exercises) = &self.exercises {
            let value = serde_json::to_value(exercises).map_err(|e| {
                AppError::internal(format!("Workout serialization failed: {e}"))
            })?;
            set.insert("exercises".to_owned(), value);
        }
        if let Some(duration) = self.duration_minutes {
            set.insert("duration_minutes".to_owned(), Value::from(duration));
        }
        if let Some(notes) = &self.notes {
            set.insert("notes".to_owned(), Value::String(notes.clone()));
        }
        Ok(set)
    }
}

fn validate_exercises(exercises: &[WorkoutExercise], details: &mut Vec<FieldError>) {
    if exercises.is_empty() {
        details.push(FieldError::new("exercises", "must not be empty"));
        return;
    }
    for (i, entry) in exercises.iter().enumerate() {
        if entry.sets.is_empty() {
            details.push(FieldError::new(
                format!("exercises[{i}].sets"),
                "must not be empty",
            ));
        }
        for (j, set) in entry.sets.iter().enumerate() {
            if set.reps < 1 {
                details.push(FieldError::new(
                    format!("exercises[{i}].sets[{j}].reps"),
                    "must be at least 1",
                ));
            }
            if set.weight_kg < 0.0 {
                details.push(FieldError::new(
                    format!("exercises[{i}].sets[{j}].weight_kg"),
                    "must be non-negative",
                ));
            }
        }
    }
}

/// Workout CRUD service
#[derive(Clone)]
pub struct WorkoutService {
    store: Arc<dyn DocumentStore>,
    metrics: MetricsService,
}

impl WorkoutService {
    /// Create the service over a document store and metric adapter
    pub fn new(store: Arc<dyn DocumentStore>, metrics: MetricsService) -> Self {
        Self { store, metrics }
    }

    fn owned(user_id: Uuid, id: &str) -> Predicate {
        Predicate::scoped_to(user_id).and_eq("id", id)
    }

    fn from_doc(doc: Value) -> AppResult<Workout> {
        serde_json::from_value(doc)
            .map_err(|e| AppError::internal(format!("Workout deserialization failed: {e}")))
    }

    /// Create a workout and emit its metrics
    ///
    /// The `exercise_id` entries are soft references and are not checked
    /// against the exercise collection.
    ///
    /// # Errors
    ///
    /// Returns validation or document store errors. Metric emission
    /// failures do not fail the create.
    pub async fn create(&self, user_id: Uuid, request: CreateWorkoutRequest) -> AppResult<Workout> {
        request.validate()?;

        let workout = Workout {
            id: Uuid::new_v4(),
            name: request.name,
            date: request.date.unwrap_or_else(Utc::now),
            exercises: request.exercises,
            duration_minutes: request.duration_minutes,
            notes: request.notes,
            user_id,
            created_at: Utc::now(),
        };

        let doc = serde_json::to_value(&workout)
            .map_err(|e| AppError::internal(format!("Workout serialization failed: {e}")))?;
        self.store.insert(WORKOUTS, doc).await?;

        self.emit_creation_metrics(&workout);
        Ok(workout)
    }

    /// Emit workout-count and workout-volume metrics in a detached task
    fn emit_creation_metrics(&self, workout: &Workout) {
        let metrics = self.metrics.clone();
        let user_id = workout.user_id;
        let workout_id = workout.id.to_string();
        let volume = workout.total_volume_kg();
        let date = workout.date;
        tokio::spawn(async move {
            if let Err(e) = metrics.record_workout_count(user_id, Some(date)).await {
                warn!(user.id = %user_id, error = %e, "workout count metric write failed");
            }
            if let Err(e) = metrics
                .record_workout_volume(user_id, &workout_id, volume, date)
                .await
            {
                warn!(user.id = %user_id, error = %e, "workout volume metric write failed");
            }
        });
    }

    /// Fetch one workout the user owns
    ///
    /// # Errors
    ///
    /// Returns not-found when the id is unknown, malformed, or owned by
    /// another user.
    pub async fn get(&self, user_id: Uuid, id: &str) -> AppResult<Workout> {
        self.store
            .find_one(WORKOUTS, &Self::owned(user_id, id))
            .await?
            .ok_or_else(|| AppError::not_found(RESOURCE))
            .and_then(Self::from_doc)
    }

    /// List the user's workouts, most recent date first
    ///
    /// # Errors
    ///
    /// Returns store errors.
    pub async fn list(
        &self,
        user_id: Uuid,
        filters: &WorkoutFilters,
        pagination: &PaginationParams,
    ) -> AppResult<Page<Workout>> {
        let predicate = filters.to_predicate(user_id);
        let total = self.store.count(WORKOUTS, &predicate).await?;
        let docs = self
            .store
            .find(
                WORKOUTS,
                &predicate,
                Some(&SortSpec::descending("date")),
                pagination.skip(),
                Some(pagination.limit()),
            )
            .await?;
        let items = docs
            .into_iter()
            .map(Self::from_doc)
            .collect::<AppResult<Vec<_>>>()?;
        Ok(Page::build(items, total, pagination))
    }

    /// Partially update one workout the user owns
    ///
    /// # Errors
    ///
    /// Returns not-found when nothing matches or when the request has no
    /// fields to apply.
    pub async fn update(
        &self,
        user_id: Uuid,
        id: &str,
        request: UpdateWorkoutRequest,
    ) -> AppResult<Workout> {
        request.validate()?;

        let set = request.to_set_map()?;
        if set.is_empty() {
            return Err(AppError::not_found(RESOURCE));
        }

        self.store
            .find_one_and_update(WORKOUTS, &Self::owned(user_id, id), &set)
            .await?
            .ok_or_else(|| AppError::not_found(RESOURCE))
            .and_then(Self::from_doc)
    }

    /// Delete one workout the user owns
    ///
    /// # Errors
    ///
    /// Returns not-found when nothing matches.
    pub async fn delete(&self, user_id: Uuid, id: &str) -> AppResult<()> {
        let deleted = self
            .store
            .delete_one(WORKOUTS, &Self::owned(user_id, id))
            .await?;
        if deleted == 0 {
            return Err(AppError::not_found(RESOURCE));
        }
        Ok(())
    }
}
