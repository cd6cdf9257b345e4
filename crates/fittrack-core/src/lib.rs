// ABOUTME: Core types for the fittrack fitness API platform
// ABOUTME: Foundation crate with error types, pagination, domain models, and filters
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # fittrack-core
//!
//! Foundation types shared by the fittrack server and its tests:
//!
//! - **errors**: unified `AppError` with stable error codes and HTTP mapping
//! - **pagination**: page/size parameters and the generic paginated envelope
//! - **models**: users, exercises, workouts, and typed metric events
//! - **filters**: filter objects and the backend-neutral query predicate

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// Filter objects and backend-neutral query predicates
pub mod filters;

/// Domain models: users, exercises, workouts, metric events
pub mod models;

/// Offset pagination parameters and the paginated response envelope
pub mod pagination;
