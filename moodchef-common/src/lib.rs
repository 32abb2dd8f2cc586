//! # MoodChef Common Library
//!
//! Shared code for the MoodChef services:
//! - Error and result types
//! - Bootstrap configuration (TOML file + environment credentials)
//! - SQLite initialization and table schemas

pub mod config;
pub mod db;
pub mod error;

pub use error::{Error, Result};
