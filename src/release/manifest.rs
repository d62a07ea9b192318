//! Placeholder plugin manifests
//!
//! The release engine needs a manifest to read and bump the version. Plugins
//! that are not Node packages get a private placeholder the first time they
//! are released; an existing manifest is never rewritten.

use crate::core::error::{RailResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Minimal package.json written for a plugin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginManifest {
  pub name: String,
  pub version: String,
  pub private: bool,
}

impl PluginManifest {
  pub fn placeholder(plugin: &str, version: &str) -> Self {
    Self {
      name: plugin.to_string(),
      version: version.to_string(),
      private: true,
    }
  }
}

/// Write a placeholder manifest into `plugin_dir` unless one already exists
///
/// Returns the manifest path when a file was created.
pub fn ensure_manifest(plugin_dir: &Path, file_name: &str, plugin: &str, version: &str) -> RailResult<Option<PathBuf>> {
  let path = plugin_dir.join(file_name);
  if path.exists() {
    return Ok(None);
  }

  let content = serde_json::to_string_pretty(&PluginManifest::placeholder(plugin, version))?;
  std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;
  tracing::debug!(path = %path.display(), "created placeholder manifest");

  Ok(Some(path))
}
