//! Chirp - a small social posting service
//!
//! This library provides the data model, the typed RPC boundary consumed by
//! the web front end, and a reference backend for that boundary (SQLite
//! persistence, content validation, per-author rate limiting).

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod projection;
pub mod rate_limiter;
pub mod service;
pub mod types;

// Re-export commonly used types
pub use api::{PostsApi, ProfileApi};
pub use config::Config;
pub use db::Database;
pub use error::{ApiError, ChirpError, Result, ValidationError};
pub use projection::filter_user_for_client;
pub use types::{Author, Post, PostWithAuthor, User};
