// ABOUTME: Service layer orchestrating validation, ownership scoping, and store access
// ABOUTME: One service per aggregate: users, exercises, workouts
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Service layer
//!
//! Each service owns one collection and the full lifecycle of its
//! documents: request validation, owner scoping, store round trips, and
//! side effects such as metric emission. Routes never touch the stores
//! directly.

/// Exercise CRUD service
pub mod exercises;
/// User registration, login, and lookup
pub mod users;
/// Workout CRUD service with metric emission
pub mod workouts;

pub use exercises::{CreateExerciseRequest, ExerciseService, UpdateExerciseRequest};
pub use users::{LoginRequest, RegisterRequest, UserService};
pub use workouts::{CreateWorkoutRequest, UpdateWorkoutRequest, WorkoutService};
