//! Unified workspace context - build once, pass everywhere
//!
//! `WorkspaceContext` resolves the repository root and loads `plugin-rail.toml`
//! a single time in main.rs; every command receives it by reference.

use crate::core::config::RailConfig;
use crate::core::error::RailResult;
use std::path::{Path, PathBuf};

/// Workspace-level data shared by all commands.
#[derive(Debug, Clone)]
pub struct WorkspaceContext {
  /// Repository root directory (where plugin-rail was started)
  pub root: PathBuf,

  /// Effective configuration (defaults when no file exists)
  pub config: RailConfig,
}

impl WorkspaceContext {
  /// Build workspace context from a root directory.
  pub fn build(workspace_root: &Path) -> RailResult<Self> {
    let root = workspace_root.to_path_buf();
    let config = RailConfig::load_or_default(&root)?;

    Ok(Self { root, config })
  }

  /// Get workspace root as Path reference (convenience)
  pub fn workspace_root(&self) -> &Path {
    &self.root
  }

  /// Absolute path of the plugins directory
  pub fn plugins_dir(&self) -> PathBuf {
    self.root.join(&self.config.workspace.plugins_dir)
  }

  /// Absolute path of a single plugin's directory
  pub fn plugin_dir(&self, plugin: &str) -> PathBuf {
    self.plugins_dir().join(plugin)
  }

  /// Directory for generated per-plugin release configs
  pub fn release_config_dir(&self) -> PathBuf {
    self.root.join(".plugin-rail").join("release")
  }
}
