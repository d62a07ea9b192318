//! System git backend - zero dependencies
//!
//! Every operation shells out to `git` with an isolated environment so user or
//! CI configuration cannot change the output format we parse.

use crate::core::error::{GitError, RailError, RailResult, ResultExt};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Git backend using system git
pub struct SystemGit {
  /// Top-level working directory (git reports paths relative to it)
  pub(crate) repo_path: PathBuf,
}

impl SystemGit {
  /// Open a git repository
  ///
  /// This performs ONE subprocess call to get the repository metadata.
  pub fn open(path: &Path) -> RailResult<Self> {
    let output = Command::new("git")
      .arg("-C")
      .arg(path)
      .args(["rev-parse", "--show-toplevel"])
      .output()
      .context("Failed to execute git rev-parse")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      if stderr.contains("not a git repository") {
        return Err(RailError::Git(GitError::RepoNotFound {
          path: path.to_path_buf(),
        }));
      }
      return Err(RailError::message(format!("Failed to open git repository: {}", stderr)));
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let work_tree = stdout.trim();
    tracing::debug!(work_tree, "opened git repository");

    Ok(Self {
      repo_path: PathBuf::from(work_tree),
    })
  }

  /// Path of the repository's hooks directory (honours `core.hooksPath`)
  pub fn hooks_dir(&self) -> RailResult<PathBuf> {
    let output = self.run(&["rev-parse", "--git-path", "hooks"])?;
    let hooks = String::from_utf8_lossy(&output.stdout).trim().to_string();
    let hooks = PathBuf::from(hooks);

    if hooks.is_absolute() {
      Ok(hooks)
    } else {
      Ok(self.repo_path.join(hooks))
    }
  }

  /// Run a git command and fail on a non-zero exit status
  pub(crate) fn run(&self, args: &[&str]) -> RailResult<Output> {
    let command = format!("git {}", args.join(" "));
    tracing::debug!(%command, "running git");

    let output = self
      .git_cmd()
      .args(args)
      .output()
      .with_context(|| format!("Failed to execute {}", command))?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(RailError::Git(GitError::CommandFailed {
        command,
        stderr: stderr.to_string(),
      }));
    }

    Ok(output)
  }

  /// Create a safe git command with isolated environment
  ///
  /// - Sets working directory to repo path
  /// - Clears environment variables
  /// - Whitelists only PATH and HOME
  /// - Adds safe configuration overrides
  pub(crate) fn git_cmd(&self) -> Command {
    let mut cmd = Command::new("git");

    cmd.arg("-C").arg(&self.repo_path);

    // Isolated environment (don't trust global config)
    cmd.env_clear();
    if let Ok(path) = std::env::var("PATH") {
      cmd.env("PATH", path);
    }
    if let Ok(home) = std::env::var("HOME") {
      cmd.env("HOME", home);
    }

    // Force safe behavior (override user config)
    cmd.arg("-c").arg("core.quotePath=false"); // Don't escape non-ASCII
    cmd.arg("-c").arg("diff.renames=true");
    cmd.arg("-c").arg("color.ui=false");

    cmd
  }
}
