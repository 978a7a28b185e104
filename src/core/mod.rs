//! Core building blocks shared by every command
//!
//! - **config**: nautus.toml parsing and validation
//! - **context**: project context built once in main
//! - **error**: error types with contextual help messages

pub mod config;
pub mod context;
pub mod error;
