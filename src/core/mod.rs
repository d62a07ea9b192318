//! Core building blocks for plugin-rail
//!
//! - **config**: plugin-rail.toml parsing and validation
//! - **context**: Workspace context shared across commands
//! - **error**: Error types with contextual help messages
//! - **vcs**: Git operations via the system `git` binary

pub mod config;
pub mod context;
pub mod error;
pub mod vcs;
