//! Core building blocks shared by every command
//!
//! - **config**: release.toml parsing and validation
//! - **context**: project root + configuration, built once in main.rs
//! - **error**: error types with contextual help messages and exit codes
//! - **exclusion**: literal-name exclusion sets for the archive and the commit
//! - **vcs**: git operations through the system git binary

pub mod config;
pub mod context;
pub mod error;
pub mod exclusion;
pub mod vcs;
