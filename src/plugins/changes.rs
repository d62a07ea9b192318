//! Changed-plugin detection
//!
//! Given two revisions, list the distinct plugin directories touched between them:
//! 1. Resolve the revision range (falling back to the previous commit)
//! 2. `git diff --name-only` over that range
//! 3. Keep paths under the plugins prefix, take the second segment, dedupe

use crate::core::error::RailResult;
use crate::core::vcs::SystemGit;
use crate::utils::path_to_git_format;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

/// CI placeholder for "no previous revision" (e.g. first push of a branch)
const ZERO_SHA_PREFIX: &str = "000000";

/// Revision used as the base when no previous revision is known
const PREVIOUS_COMMIT: &str = "HEAD~1";

/// Revision range compared by the change detector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffRange {
  pub from: String,
  pub to: String,
}

impl DiffRange {
  /// Resolve the range from optional previous/current revisions
  ///
  /// `to` defaults to `HEAD`. A missing, empty, or all-zero `prev` compares
  /// against the commit immediately before HEAD.
  pub fn resolve(prev: Option<&str>, curr: Option<&str>) -> Self {
    let to = curr
      .map(str::trim)
      .filter(|s| !s.is_empty())
      .unwrap_or("HEAD")
      .to_string();

    let from = match prev.map(str::trim) {
      Some(sha) if !sha.is_empty() && !sha.starts_with(ZERO_SHA_PREFIX) => sha.to_string(),
      _ => PREVIOUS_COMMIT.to_string(),
    };

    Self { from, to }
  }

  /// Whether the range fell back to the previous commit
  pub fn is_fallback(&self) -> bool {
    self.from == PREVIOUS_COMMIT
  }
}

impl std::fmt::Display for DiffRange {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{} {}", self.from, self.to)
  }
}

/// Result of change detection
#[derive(Debug, Clone, Serialize)]
pub struct ChangeSet {
  pub range: DiffRange,
  /// Every changed path in the range
  pub changed_files: Vec<String>,
  /// Distinct plugin names, in order of first appearance
  pub plugins: Vec<String>,
}

/// Extract changed plugin names from `git diff --name-only` output
///
/// A path counts when it starts with `<prefix>/`; its plugin is the next path
/// segment. Duplicates are dropped, keeping first-seen order.
pub fn changed_plugins(diff_output: &str, prefix: &str) -> Vec<String> {
  let prefix = format!("{}/", prefix.trim_end_matches('/'));
  let mut seen = HashSet::new();
  let mut plugins = Vec::new();

  for line in diff_output.lines() {
    let Some(rest) = line.trim_end_matches('\r').strip_prefix(&prefix) else {
      continue;
    };
    let name = rest.split('/').next().unwrap_or_default();
    if name.is_empty() {
      continue;
    }
    if seen.insert(name) {
      plugins.push(name.to_string());
    }
  }

  plugins
}

/// Run the diff for `range` and collect the changed plugins
pub fn detect(repo_root: &Path, plugins_dir: &Path, range: DiffRange) -> RailResult<ChangeSet> {
  let git = SystemGit::open(repo_root)?;
  tracing::info!(from = %range.from, to = %range.to, "computing changed plugins");

  let diff = git.diff_name_only(&range.from, &range.to)?;
  let prefix = path_to_git_format(plugins_dir);
  let plugins = changed_plugins(&diff, &prefix);

  let changed_files = diff
    .lines()
    .filter(|l| !l.trim().is_empty())
    .map(str::to_string)
    .collect();

  tracing::debug!(?plugins, "changed plugins");

  Ok(ChangeSet {
    range,
    changed_files,
    plugins,
  })
}
