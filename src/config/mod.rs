//! Configuration module for recolor runs
//!
//! Provides types and parsing for the optional `recolor.toml` project file.

pub mod loader;
pub mod schema;

pub use schema::*;
