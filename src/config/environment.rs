// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses environment variables into a typed ServerConfig at process startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Environment-based configuration management
//!
//! All settings come from environment variables, parsed once at startup.
//! The JWT secret is required in production; development and testing
//! runs generate a random one so the server always starts locally.

use fittrack_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use tracing::warn;

use crate::auth::DEFAULT_TOKEN_EXPIRY_HOURS;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Default operational logging
    #[default]
    Info,
    /// Verbose diagnostics
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback to `Info`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }

    /// Directive string for the tracing `EnvFilter`
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }
}

/// Deployment environment type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback to `Development`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" => Self::Production,
            "testing" => Self::Testing,
            _ => Self::Development,
        }
    }
}

/// Server configuration parsed from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// HTTP bind address
    pub host: String,
    /// Deployment environment
    pub environment: Environment,
    /// Shared secret for JWT signing
    pub jwt_secret: String,
    /// Token lifetime in hours
    pub token_expiry_hours: i64,
    /// Time-series bucket metric points are written to
    pub metrics_bucket: String,
    /// Log verbosity
    pub log_level: LogLevel,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns a configuration error when a variable fails to parse or
    /// when `SECRET_KEY` is missing in production.
    pub fn from_env() -> AppResult<Self> {
        let environment = Environment::from_str_or_default(
            &env::var("ENVIRONMENT").unwrap_or_default(),
        );

        let http_port = match env::var("PORT") {
            Ok(value) => value
                .parse::<u16>()
                .map_err(|e| AppError::config(format!("Invalid PORT value {value:?}: {e}")))?,
            Err(_) => 8000,
        };

        let token_expiry_hours = match env::var("TOKEN_EXPIRY_HOURS") {
            Ok(value) => value.parse::<i64>().map_err(|e| {
                AppError::config(format!("Invalid TOKEN_EXPIRY_HOURS value {value:?}: {e}"))
            })?,
            Err(_) => DEFAULT_TOKEN_EXPIRY_HOURS,
        };

        let jwt_secret = match env::var("SECRET_KEY") {
            Ok(secret) if !secret.is_empty() => secret,
            _ if environment == Environment::Production => {
                return Err(AppError::config("SECRET_KEY is required in production"));
            }
            _ => {
                warn!("SECRET_KEY not set; generating an ephemeral development secret");
                generate_dev_secret()
            }
        };

        Ok(Self {
            http_port,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_owned()),
            environment,
            jwt_secret,
            token_expiry_hours,
            metrics_bucket: env::var("METRICS_BUCKET")
                .unwrap_or_else(|_| "fitness-metrics".to_owned()),
            log_level: LogLevel::from_str_or_default(&env::var("LOG_LEVEL").unwrap_or_default()),
        })
    }
}

fn generate_dev_secret() -> String {
    use rand::RngCore;
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
