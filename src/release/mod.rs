//! Per-plugin release orchestration
//!
//! Version computation, changelogs, tags and image publishing all belong to the
//! external release engine. This module prepares each changed plugin for it and
//! invokes it:
//!
//! 1. Skip plugins whose directory is gone
//! 2. Write a placeholder manifest if the plugin has none
//! 3. Render the plugin's release config (tag format, scoped release rules, image)
//! 4. Run the release command in the plugin directory with `PLUGIN_NAME` set
//!
//! # Example plugin-rail.toml
//!
//! ```toml
//! [release]
//! command = ["npx", "semantic-release", "--extends", "{config}"]
//! tag_format = "{plugin}-v${version}"
//! registry_env = "DOCKER_REG_USERNAME"
//! ```

pub mod manifest;
pub mod runner;
pub mod template;

pub use runner::{ProcessExecutor, ReleaseLayout, ReleaseRunner, ReleaseSummary};
pub use template::ReleaseTemplate;
