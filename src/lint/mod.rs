//! Commit message linting
//!
//! Commits must follow the conventional format and may only be scoped to a
//! plugin (or one of the configured extra scopes). Messages come from a literal
//! string, a commit-msg hook file, or every commit in a revision range.

pub mod commit;
pub mod rules;

pub use rules::{Level, LintReport, Linter};

use crate::core::error::{RailResult, ResultExt};
use crate::core::vcs::SystemGit;
use std::path::{Path, PathBuf};

/// Where the messages to lint come from
#[derive(Debug, Clone)]
pub enum LintSource {
  /// A literal message
  Message(String),
  /// A commit message file (commit-msg hook `$1`)
  Edit(PathBuf),
  /// Every commit in `from..to`
  Range { from: String, to: String },
}

/// A message to lint, tagged with the commit it came from (if any)
#[derive(Debug, Clone)]
pub struct LintInput {
  pub sha: Option<String>,
  pub author: Option<String>,
  pub message: String,
}

impl LintSource {
  /// Collect the messages for this source
  pub fn collect(&self, repo_root: &Path) -> RailResult<Vec<LintInput>> {
    match self {
      LintSource::Message(message) => Ok(vec![LintInput {
        sha: None,
        author: None,
        message: commit::trim_trailing_newlines(message).to_string(),
      }]),
      LintSource::Edit(path) => {
        let path = if path.is_absolute() {
          path.clone()
        } else {
          repo_root.join(path)
        };
        let raw = std::fs::read_to_string(&path)
          .with_context(|| format!("Failed to read commit message from {}", path.display()))?;
        Ok(vec![LintInput {
          sha: None,
          author: None,
          message: commit::strip_comments(&raw),
        }])
      }
      LintSource::Range { from, to } => {
        let git = SystemGit::open(repo_root)?;
        let commits = git.commits_between(from, to)?;
        tracing::debug!(count = commits.len(), %from, %to, "collected commits to lint");
        Ok(
          commits
            .into_iter()
            .map(|c| LintInput {
              sha: Some(c.sha),
              author: Some(c.author),
              message: c.message,
            })
            .collect(),
        )
      }
    }
  }
}
