// ABOUTME: Configuration management for the fittrack server
// ABOUTME: Environment-driven settings parsed once at startup
//
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Environment-based server configuration
pub mod environment;

pub use environment::{Environment, LogLevel, ServerConfig};
