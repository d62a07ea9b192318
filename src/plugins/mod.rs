//! Plugin discovery and change detection
//!
//! A plugin is an immediate subdirectory of the plugins directory; its name is
//! the directory name. That name doubles as the commit scope and the release
//! channel, so everything else in plugin-rail starts here.

pub mod changes;

use crate::core::error::{RailResult, ResultExt};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

pub use changes::{ChangeSet, DiffRange};

/// List the plugin names under `plugins_dir`
///
/// Only directories count; files, broken symlinks and other entries are skipped.
/// A missing directory yields an empty list.
pub fn list_plugins(plugins_dir: &Path) -> RailResult<Vec<String>> {
  if !plugins_dir.exists() {
    tracing::debug!(dir = %plugins_dir.display(), "plugins directory missing");
    return Ok(Vec::new());
  }

  let entries =
    fs::read_dir(plugins_dir).with_context(|| format!("Failed to read plugins directory {}", plugins_dir.display()))?;

  let mut names = Vec::new();
  for entry in entries {
    let entry = entry.with_context(|| format!("Failed to read entry in {}", plugins_dir.display()))?;
    // Follows symlinks, matching a stat() on the entry
    if !entry.path().is_dir() {
      continue;
    }
    names.push(entry.file_name().to_string_lossy().into_owned());
  }

  names.sort();
  Ok(names)
}

/// Allow-list of commit scopes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeSet {
  scopes: BTreeSet<String>,
}

impl ScopeSet {
  /// Build the allow-list from the plugin directories plus any extra scopes
  pub fn discover(plugins_dir: &Path, extra: &[String]) -> RailResult<Self> {
    let mut set = Self::from_names(list_plugins(plugins_dir)?);
    set.scopes.extend(extra.iter().cloned());
    Ok(set)
  }

  pub fn from_names<I, S>(names: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      scopes: names.into_iter().map(Into::into).collect(),
    }
  }

  pub fn contains(&self, scope: &str) -> bool {
    self.scopes.contains(scope)
  }

  pub fn is_empty(&self) -> bool {
    self.scopes.is_empty()
  }

  pub fn len(&self) -> usize {
    self.scopes.len()
  }

  /// Scopes in sorted order
  pub fn iter(&self) -> impl Iterator<Item = &str> {
    self.scopes.iter().map(String::as_str)
  }
}
