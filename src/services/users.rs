// ABOUTME: User account service handling registration, login, and lookup by id
// ABOUTME: Emails are lowercased on the way in; credential failures are uniform
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! User account service
//!
//! Registration enforces case-insensitive email uniqueness by lowercasing
//! before both the duplicate check and the insert. Login failures never
//! say whether the email or the password was wrong.

use std::sync::Arc;

use chrono::Utc;
use fittrack_core::errors::{AppError, AppResult, FieldError};
use fittrack_core::filters::Predicate;
use fittrack_core::models::User;
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::AuthManager;
use crate::store::DocumentStore;

const USERS: &str = "users";

/// Registration request body
#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    /// Email address; must contain `@`
    pub email: String,
    /// Password; at least 8 characters
    pub password: String,
    /// Display name; must not be empty
    pub name: String,
    /// Optional baseline body weight in kilograms
    pub initial_weight_kg: Option<f64>,
    /// Optional height in centimeters
    pub height_cm: Option<f64>,
}

impl RegisterRequest {
    /// Validate all fields, collecting every violation
    ///
    /// # Errors
    ///
    /// Returns a validation error listing each failing field.
    pub fn validate(&self) -> AppResult<()> {
        let mut details = Vec::new();
        if !self.email.contains('@') {
            details.push(FieldError::new("email", "must be a valid email address"));
        }
        if self.password.len() < 8 {
            details.push(FieldError::new("password", "must be at least 8 characters"));
        }
        if self.name.trim().is_empty() {
            details.push(FieldError::new("name", "must not be empty"));
        }
        if details.is_empty() {
            Ok(())
        } else {
            Err(AppError::validation(details))
        }
    }
}

/// Login request body
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    /// Email address
    pub email: String,
    /// Password
    pub password: String,
}

/// User registration, login, and lookup
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn DocumentStore>,
    auth: Arc<AuthManager>,
}

impl UserService {
    /// Create the service over a store and auth manager
    pub fn new(store: Arc<dyn DocumentStore>, auth: Arc<AuthManager>) -> Self {
        Self { store, auth }
    }

    /// Register a new account
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad fields, a conflict error when
    /// the email is already registered, and store errors otherwise.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<User> {
        request.validate()?;

        let email = request.email.to_lowercase();
        let existing = self
            .store
            .find_one(USERS, &Predicate::lookup("email", email.as_str()))
            .await?;
        if existing.is_some() {
            return Err(AppError::already_exists("Email already registered"));
        }

        let user = User {
            id: Uuid::new_v4(),
            email,
            password_hash: self.auth.hash_password(&request.password)?,
            name: request.name,
            initial_weight_kg: request.initial_weight_kg,
            height_cm: request.height_cm,
            created_at: Utc::now(),
        };

        let doc = serde_json::to_value(&user)
            .map_err(|e| AppError::internal(format!("User serialization failed: {e}")))?;
        self.store.insert(USERS, doc).await?;

        info!(user.id = %user.id, "registered new user");
        Ok(user)
    }

    /// Authenticate credentials and issue a bearer token
    ///
    /// # Errors
    ///
    /// Returns the uniform credential error for an unknown email or a
    /// wrong password.
    pub async fn login(&self, request: LoginRequest) -> AppResult<(User, String)> {
        let email = request.email.to_lowercase();
        let user = self
            .store
            .find_one(USERS, &Predicate::lookup("email", email.as_str()))
            .await?
            .ok_or_else(AuthManager::credentials_error)?;
        let user: User = serde_json::from_value(user)
            .map_err(|e| AppError::internal(format!("User deserialization failed: {e}")))?;

        if !self.auth.verify_password(&request.password, &user.password_hash) {
            return Err(AuthManager::credentials_error());
        }

        let token = self.auth.generate_token(&user)?;
        info!(user.id = %user.id, "user logged in");
        Ok((user, token))
    }

    /// Look a user up by id
    ///
    /// # Errors
    ///
    /// Propagates store failures; an unknown id is `Ok(None)`.
    pub async fn get(&self, id: Uuid) -> AppResult<Option<User>> {
        let doc = self
            .store
            .find_one(USERS, &Predicate::lookup("id", id.to_string()))
            .await?;
        doc.map(|doc| {
            serde_json::from_value(doc)
                .map_err(|e| AppError::internal(format!("User deserialization failed: {e}")))
        })
        .transpose()
    }
}
