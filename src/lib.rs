// ABOUTME: Main library entry point for the fittrack fitness tracking API
// ABOUTME: Wires the auth, service, store, and route layers into one crate
//
// SPDX-License-Identifier: MIT OR Apache-2.0

#![deny(unsafe_code)]

//! # fittrack
//!
//! A fitness tracking REST API. Users register accounts, maintain their
//! own exercise catalogs and workout logs, and record body and
//! performance metrics into a time-series store.
//!
//! ## Architecture
//!
//! - **Routes**: axum handlers, one module per resource
//! - **Services**: validation, ownership scoping, and orchestration
//! - **Store**: backend-neutral document store executing predicates
//! - **Tsdb**: time-series store behind the metric adapter
//! - **Auth**: bcrypt password hashing and JWT bearer tokens
//!
//! Domain types, filters, pagination, and the error taxonomy live in the
//! `fittrack-core` crate.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use fittrack::config::ServerConfig;
//! use fittrack::context::ServerResources;
//! use fittrack::store::MemoryDocumentStore;
//! use fittrack::tsdb::MemoryTimeSeriesStore;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = ServerConfig::from_env()?;
//! let resources = Arc::new(ServerResources::new(
//!     config,
//!     Arc::new(MemoryDocumentStore::new()),
//!     Arc::new(MemoryTimeSeriesStore::new()),
//! ));
//! let app = fittrack::routes::router(resources);
//! # let _ = app;
//! # Ok(())
//! # }
//! ```

/// JWT authentication and password hashing
pub mod auth;
/// Environment-driven configuration
pub mod config;
/// Shared server resources container
pub mod context;
/// Structured logging setup
pub mod logging;
/// Metric adapter over the time-series store
pub mod metrics;
/// HTTP route handlers
pub mod routes;
/// Service layer
pub mod services;
/// Document store abstraction and backends
pub mod store;
/// Time-series store abstraction and backends
pub mod tsdb;
