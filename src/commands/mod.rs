//! CLI commands for plugin-rail
//!
//! ## Setup
//! - **init**: Write plugin-rail.toml and optionally a commit-msg hook
//!
//! ## Commit policy
//! - **scopes**: List valid commit scopes (one per plugin directory)
//! - **lint**: Validate commit messages against conventional-commit rules
//!
//! ## Releases
//! - **changed**: Plugins touched between two revisions
//! - **release**: Run the release engine for each changed plugin
//! - **release-config**: Show the release engine config rendered for a plugin
//!
//! All commands accept `&WorkspaceContext` so config is loaded once.

pub mod changed;
pub mod init;
pub mod lint;
pub mod release;
pub mod scopes;

pub use changed::run_changed;
pub use init::run_init;
pub use lint::run_lint;
pub use release::{run_release, run_release_config};
pub use scopes::run_scopes;
