//! # SynCore Common Library
//!
//! Shared code for the SynCore site backend:
//! - Database initialization, schema, and query layer
//! - Content model types
//! - Configuration and data directory resolution
//! - Common error type

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
