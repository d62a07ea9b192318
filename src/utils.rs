//! Utility functions for cross-platform path handling

use std::path::Path;

/// Convert a path to Git format (always forward slashes, no leading `./`)
///
/// Git reports paths with forward slashes, even on Windows, so anything
/// compared against `git diff` output goes through here first.
pub fn path_to_git_format(path: &Path) -> String {
  #[cfg(target_os = "windows")]
  let formatted = path.to_string_lossy().replace('\\', "/");
  #[cfg(not(target_os = "windows"))]
  let formatted = path.to_string_lossy().to_string();

  formatted.trim_start_matches("./").trim_end_matches('/').to_string()
}
