//! # MeeTask Client Library
//!
//! The application side of MeeTask: talks to the backend REST API,
//! caches query results, and drives the screens as headless controllers.
//!
//! ## Modules
//!
//! - `api`: Typed HTTP client for the backend endpoints
//! - `cache`: Keyed remote-query cache with deduplication and invalidation
//! - `config`: Configuration management
//! - `error`: Client-side error taxonomy
//! - `routes`: In-app navigation targets
//! - `screens`: Per-screen controllers (board, extraction, detail, ...)
//! - `store`: Binds the API client to the cache; the one data access point

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod routes;
pub mod screens;
pub mod store;
