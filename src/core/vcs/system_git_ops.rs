//! Diff and commit-walking operations for SystemGit

use super::CommitInfo;
use super::system_git::SystemGit;
use crate::core::error::{GitError, RailError, RailResult, ResultExt};

impl SystemGit {
  /// Paths changed between two revisions (`git diff --name-only <from> <to>`)
  ///
  /// Returned as the raw stdout so callers can parse it like any diff listing.
  pub fn diff_name_only(&self, from: &str, to: &str) -> RailResult<String> {
    let output = self.run(&["diff", "--name-only", from, to])?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
  }

  /// Commits reachable from `to` but not from `from`, oldest first
  pub fn commits_between(&self, from: &str, to: &str) -> RailResult<Vec<CommitInfo>> {
    let range = format!("{}..{}", from, to);
    let output = self.run(&["rev-list", "--reverse", &range])?;

    String::from_utf8_lossy(&output.stdout)
      .lines()
      .map(str::trim)
      .filter(|sha| !sha.is_empty())
      .map(|sha| self.get_commit(sha))
      .collect()
  }

  /// Get commit metadata for a single SHA
  pub fn get_commit(&self, sha: &str) -> RailResult<CommitInfo> {
    // %H (hash) %an (author name) %B (raw body)
    let output = self
      .git_cmd()
      .args(["log", "-1", "--format=%H%n%an%n%B", sha])
      .output()
      .context("Failed to get commit info")?;

    if !output.status.success() {
      return Err(RailError::Git(GitError::CommitNotFound { sha: sha.to_string() }));
    }

    parse_commit_output(&output.stdout)
  }
}

/// Parse `git log --format=%H%n%an%n%B` output into CommitInfo
fn parse_commit_output(data: &[u8]) -> RailResult<CommitInfo> {
  let output = String::from_utf8_lossy(data);
  let mut lines = output.lines();

  let sha = lines.next().ok_or_else(|| RailError::message("Missing commit SHA"))?.to_string();
  let author = lines.next().ok_or_else(|| RailError::message("Missing author name"))?.to_string();

  // Rest is commit message
  let message = lines.collect::<Vec<_>>().join("\n").trim_end().to_string();

  Ok(CommitInfo { sha, author, message })
}
