// ABOUTME: Filter objects and the backend-neutral predicate they translate into
// ABOUTME: Every predicate is owner-scoped first; presence is tracked with Option, never truthiness
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Filter-to-Query Translation
//!
//! User-supplied filter objects translate into a [`Predicate`]: an ordered
//! list of field constraints a document store backend can execute. The
//! translation is pure and deterministic, and the owner `user_id` equality
//! clause always comes first. That clause is the authorization boundary:
//! no combination of filters can widen a query past one user's data.
//!
//! Numeric filter presence is carried by `Option`, so `duration_min = Some(0)`
//! still contributes a clause. Truthiness checks cannot make that
//! distinction and must never be used here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{ExerciseCategory, ExerciseType};

/// A typed scalar a constraint compares against
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Scalar {
    /// UTF-8 string
    Str(String),
    /// Signed integer
    Int(i64),
    /// Floating point number
    Float(f64),
    /// UTC timestamp
    DateTime(DateTime<Utc>),
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

impl From<i64> for Scalar {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<u32> for Scalar {
    fn from(n: u32) -> Self {
        Self::Int(i64::from(n))
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Self::Float(n)
    }
}

impl From<DateTime<Utc>> for Scalar {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }
}

/// One field constraint within a predicate
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Constraint {
    /// Exact equality
    Eq(Scalar),
    /// Case-insensitive substring match
    Contains(String),
    /// Inclusive range; either bound alone produces a half-open range
    Range {
        /// Inclusive lower bound (`$gte`-style)
        min: Option<Scalar>,
        /// Inclusive upper bound (`$lte`-style)
        max: Option<Scalar>,
    },
}

/// One clause of a predicate: a field name and its constraint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Clause {
    /// Document field the constraint applies to
    pub field: String,
    /// The constraint itself
    pub constraint: Constraint,
}

/// Backend-neutral conjunction of field constraints
///
/// Clauses are ANDed. Constructed via [`Predicate::scoped_to`], which
/// injects the owner clause before anything else.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Predicate {
    clauses: Vec<Clause>,
}

impl Predicate {
    /// Start a predicate scoped to one user's documents
    ///
    /// The owner clause is always the first clause; every query built from
    /// this predicate is limited to that user's data regardless of what
    /// other clauses follow.
    #[must_use]
    pub fn scoped_to(user_id: Uuid) -> Self {
        Self {
            clauses: vec![Clause {
                field: "user_id".to_owned(),
                constraint: Constraint::Eq(Scalar::Str(user_id.to_string())),
            }],
        }
    }

    /// Start an unscoped predicate from a single equality clause
    ///
    /// For collections without an owner field, such as looking a user up
    /// by email or id. Owner-scoped data always goes through
    /// [`Predicate::scoped_to`] instead.
    #[must_use]
    pub fn lookup(field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        Self {
            clauses: vec![Clause {
                field: field.into(),
                constraint: Constraint::Eq(value.into()),
            }],
        }
    }

    /// Add an equality clause
    #[must_use]
    pub fn and_eq(mut self, field: impl Into<String>, value: impl Into<Scalar>) -> Self {
        self.clauses.push(Clause {
            field: field.into(),
            constraint: Constraint::Eq(value.into()),
        });
        self
    }

    /// Add a case-insensitive substring clause
    #[must_use]
    pub fn and_contains(mut self, field: impl Into<String>, substring: impl Into<String>) -> Self {
        self.clauses.push(Clause {
            field: field.into(),
            constraint: Constraint::Contains(substring.into()),
        });
        self
    }

    /// Add an inclusive range clause when at least one bound is present
    ///
    /// With both bounds absent the predicate is returned unchanged; a
    /// single bound produces a half-open range.
    #[must_use]
    pub fn and_range(
        mut self,
        field: impl Into<String>,
        min: Option<Scalar>,
        max: Option<Scalar>,
    ) -> Self {
        if min.is_some() || max.is_some() {
            self.clauses.push(Clause {
                field: field.into(),
                constraint: Constraint::Range { min, max },
            });
        }
        self
    }

    /// The clauses of this predicate, owner clause first
    #[must_use]
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }
}

/// Optional filters for exercise listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExerciseFilters {
    /// Case-insensitive substring match against the exercise name
    pub search: Option<String>,
    /// Exact category match
    pub category: Option<ExerciseCategory>,
    /// Exact type match
    pub exercise_type: Option<ExerciseType>,
}

impl ExerciseFilters {
    /// Translate into an owner-scoped predicate
    ///
    /// Pure: translating the same filters twice yields structurally equal
    /// predicates; all-empty filters yield exactly the owner clause.
    #[must_use]
    pub fn to_predicate(&self, user_id: Uuid) -> Predicate {
        let mut predicate = Predicate::scoped_to(user_id);
        if let Some(search) = &self.search {
            predicate = predicate.and_contains("name", search.clone());
        }
        if let Some(category) = self.category {
            predicate = predicate.and_eq("category", category.as_str());
        }
        if let Some(exercise_type) = self.exercise_type {
            predicate = predicate.and_eq("exercise_type", exercise_type.as_str());
        }
        predicate
    }
}

/// Optional filters for workout listings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WorkoutFilters {
    /// Case-insensitive substring match against the workout name
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

impl WorkoutFilters {
    /// Translate into an owner-scoped predicate
    ///
    /// Each range bound is included independently, so a single bound makes
    /// a half-open range. A supplied zero is present: `Some(0)` contributes
    /// a clause just like any other value.
    #[must_use]
    pub fn to_predicate(&self, user_id: Uuid) -> Predicate {
        let mut predicate = Predicate::scoped_to(user_id);
        if let Some(search) = &self.search {
            predicate = predicate.and_contains("name", search.clone());
        }
        predicate = predicate.and_range(
            "date",
            self.date_from.map(Scalar::from),
            self.date_to.map(Scalar::from),
        );
        predicate = predicate.and_range(
            "duration_minutes",
            self.duration_min.map(Scalar::from),
            self.duration_max.map(Scalar::from),
        );
        predicate
    }
}
