// ABOUTME: Domain models for users, exercises, workouts, and typed metric events
// ABOUTME: Closed-set enums stay typed here and become plain strings only at the store boundary
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain models
//!
//! Persisted entities (`User`, `Exercise`, `Workout`) plus the typed metric
//! events forwarded to the time-series store. Categories and types are
//! closed sets represented as enums throughout; `as_str`/`parse` pairs
//! exist for the persistence boundary.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppResult, FieldError};

/// A registered user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,
    /// Email address, stored lowercased and unique case-insensitively
    pub email: String,
    /// Bcrypt password hash (never serialized into API responses)
    pub password_hash: String,
    /// Display name
    pub name: String,
    /// Baseline body weight in kilograms, if provided at registration
    pub initial_weight_kg: Option<f64>,
    /// Height in centimeters, if provided at registration
    pub height_cm: Option<f64>,
    /// Registration timestamp
    pub created_at: DateTime<Utc>,
}

/// Muscle group or modality an exercise belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseCategory {
    /// Chest exercises
    Chest,
    /// Back exercises
    Back,
    /// Leg exercises
    Legs,
    /// Arm exercises
    Arms,
    /// Shoulder exercises
    Shoulders,
    /// Cardiovascular work
    Cardio,
    /// Core and trunk work
    Core,
}

impl ExerciseCategory {
    /// Store string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Chest => "chest",
            Self::Back => "back",
            Self::Legs => "legs",
            Self::Arms => "arms",
            Self::Shoulders => "shoulders",
            Self::Cardio => "cardio",
            Self::Core => "core",
        }
    }

    /// Parse from the store string representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "chest" => Some(Self::Chest),
            "back" => Some(Self::Back),
            "legs" => Some(Self::Legs),
            "arms" => Some(Self::Arms),
            "shoulders" => Some(Self::Shoulders),
            "cardio" => Some(Self::Cardio),
            "core" => Some(Self::Core),
            _ => None,
        }
    }
}

/// Broad training modality of an exercise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseType {
    /// Resistance training
    Strength,
    /// Cardiovascular training
    Cardio,
    /// Mobility and stretching
    Flexibility,
}

impl ExerciseType {
    /// Store string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Strength => "strength",
            Self::Cardio => "cardio",
            Self::Flexibility => "flexibility",
        }
    }

    /// Parse from the store string representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "strength" => Some(Self::Strength),
            "cardio" => Some(Self::Cardio),
            "flexibility" => Some(Self::Flexibility),
            _ => None,
        }
    }
}

/// An exercise definition owned by a single user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// Optional free-text description
    pub description: Option<String>,
    /// Muscle group or modality
    pub category: ExerciseCategory,
    /// Training modality
    pub exercise_type: ExerciseType,
    /// Owning user; every query is scoped to this
    pub user_id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// One set within a workout exercise entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SetEntry {
    /// Repetitions performed, at least 1
    pub reps: u32,
    /// Weight lifted in kilograms, non-negative
    pub weight_kg: f64,
}

/// One exercise entry within a workout, with its ordered sets
///
/// `exercise_id` is a soft reference: it is not validated against the
/// exercise collection and may dangle after the exercise is deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutExercise {
    /// Referenced exercise id (unvalidated soft reference)
    pub exercise_id: String,
    /// Ordered, non-empty sequence of sets
    pub sets: Vec<SetEntry>,
    /// Optional per-exercise note
    pub notes: Option<String>,
}

/// A workout session owned by a single user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workout {
    /// Unique identifier
    pub id: Uuid,
    /// Display name
    pub name: String,
    /// When the workout took place
    pub date: DateTime<Utc>,
    /// Ordered, non-empty sequence of exercise entries
    pub exercises: Vec<WorkoutExercise>,
    /// Duration in minutes, at least 1
    pub duration_minutes: u32,
    /// Optional free-text notes
    pub notes: Option<String>,
    /// Owning user; every query is scoped to this
    pub user_id: Uuid,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Workout {
    /// Total volume lifted across all exercises: Σ reps × weight
    #[must_use]
    pub fn total_volume_kg(&self) -> f64 {
        self.exercises
            .iter()
            .flat_map(|e| e.sets.iter())
            .map(|s| f64::from(s.reps) * s.weight_kg)
            .sum()
    }
}

/// Kinds of time-series metrics the platform tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Body weight observations
    BodyWeight,
    /// Total volume lifted in one workout
    WorkoutVolume,
    /// Maximum weight lifted for one exercise
    ExerciseMax,
    /// Workout frequency increments (one event per workout)
    WorkoutCount,
}

impl MetricKind {
    /// Time-series measurement name for this kind
    #[must_use]
    pub const fn measurement(&self) -> &'static str {
        match self {
            Self::BodyWeight => "body_weight",
            Self::WorkoutVolume => "workout_volume",
            Self::ExerciseMax => "exercise_max",
            Self::WorkoutCount => "workout_count",
        }
    }
}

/// Body weight metric event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyWeightMetric {
    /// Body weight in kilograms, in `[1, 500]`
    pub weight_kg: f64,
    /// Observation time; defaults to event-creation time when omitted
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl BodyWeightMetric {
    /// Validate range constraints
    ///
    /// # Errors
    ///
    /// Returns the per-field violations, if any.
    pub fn validate(&self) -> AppResult<()> {
        let mut details = Vec::new();
        if !(1.0..=500.0).contains(&self.weight_kg) {
            details.push(FieldError::new("weight_kg", "must be between 1 and 500"));
        }
        require_valid(details)
    }
}

/// Workout volume metric event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkoutVolumeMetric {
    /// Workout this volume belongs to
    pub workout_id: String,
    /// Total volume lifted in kilograms, non-negative
    pub total_volume_kg: f64,
    /// Observation time; defaults to event-creation time when omitted
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl WorkoutVolumeMetric {
    /// Validate range constraints
    ///
    /// # Errors
    ///
    /// Returns the per-field violations, if any.
    pub fn validate(&self) -> AppResult<()> {
        let mut details = Vec::new();
        if self.total_volume_kg < 0.0 {
            details.push(FieldError::new("total_volume_kg", "must be non-negative"));
        }
        if self.workout_id.is_empty() {
            details.push(FieldError::new("workout_id", "must not be empty"));
        }
        require_valid(details)
    }
}

/// Per-exercise maximum weight metric event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseMaxMetric {
    /// Exercise this maximum belongs to
    pub exercise_id: String,
    /// Maximum weight lifted in kilograms, non-negative
    pub max_weight_kg: f64,
    /// Repetitions performed at that weight, at least 1
    pub reps: u32,
    /// Observation time; defaults to event-creation time when omitted
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl ExerciseMaxMetric {
    /// Validate range constraints
    ///
    /// # Errors
    ///
    /// Returns the per-field violations, if any.
    pub fn validate(&self) -> AppResult<()> {
        let mut details = Vec::new();
        if self.max_weight_kg < 0.0 {
            details.push(FieldError::new("max_weight_kg", "must be non-negative"));
        }
        if self.reps < 1 {
            details.push(FieldError::new("reps", "must be at least 1"));
        }
        if self.exercise_id.is_empty() {
            details.push(FieldError::new("exercise_id", "must not be empty"));
        }
        require_valid(details)
    }
}

/// Parameters for a time-range metric query
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricQuery {
    /// Which metric kind to read
    pub metric_kind: MetricKind,
    /// Range start; when absent the query covers the 30 days ending now
    pub start: Option<DateTime<Utc>>,
    /// Range end; only honored together with `start`
    pub end: Option<DateTime<Utc>>,
    /// Exercise tag filter, applied only for `exercise_max` queries
    pub exercise_id: Option<String>,
    /// Workout tag filter, applied only for `workout_volume` queries
    pub workout_id: Option<String>,
}

/// One observation returned by a metric query
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricPoint {
    /// Observation time
    pub timestamp: DateTime<Utc>,
    /// Field value
    pub value: f64,
    /// Field name plus any `exercise_`/`workout_`-prefixed tags.
    /// Generic passthrough: new tag kinds need no code change, at the
    /// cost of exposing the internal tag-naming convention.
    pub metadata: std::collections::BTreeMap<String, String>,
}

fn require_valid(details: Vec<FieldError>) -> AppResult<()> {
    if details.is_empty() {
        Ok(())
    } else {
        Err(crate::errors::AppError::validation(details))
    }
}
