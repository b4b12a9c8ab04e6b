//! # MeeTask Shared Library
//!
//! This crate contains the domain types and pure view-model logic shared
//! by the MeeTask client surfaces.
//!
//! ## Module Organization
//!
//! - `models`: backend data model and validated request payloads
//! - `board`: task board view-model (filter / sort / bucket)

pub mod board;
pub mod models;

/// Current version of the MeeTask shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
