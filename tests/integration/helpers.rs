//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// A plugin monorepo with git history
pub struct TestWorkspace {
  _root: TempDir,
  pub path: PathBuf,
}

impl TestWorkspace {
  /// Create a new repository with an initial commit and an empty plugins/ directory
  pub fn new() -> Result<Self> {
    let root = TempDir::new()?;
    let path = root.path().to_path_buf();

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;
    git(&path, &["config", "commit.gpgsign", "false"])?;

    std::fs::write(path.join("README.md"), "# Plugins\n")?;
    std::fs::create_dir_all(path.join("plugins"))?;

    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "chore: initial commit"])?;

    Ok(Self { _root: root, path })
  }

  /// Add a plugin directory with a single file
  pub fn add_plugin(&self, name: &str) -> Result<PathBuf> {
    let plugin_path = self.path.join("plugins").join(name);
    std::fs::create_dir_all(&plugin_path)?;
    std::fs::write(plugin_path.join("main.tf"), format!("# {}\n", name))?;
    Ok(plugin_path)
  }

  /// Write (or overwrite) a file relative to the repository root
  pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
    let file_path = self.path.join(path);
    if let Some(parent) = file_path.parent() {
      std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
  }

  /// Write plugin-rail.toml
  pub fn write_config(&self, content: &str) -> Result<()> {
    self.write_file("plugin-rail.toml", content)
  }

  /// Commit current changes
  pub fn commit(&self, message: &str) -> Result<String> {
    git(&self.path, &["add", "-A"])?;
    git(&self.path, &["commit", "-m", message])?;
    self.head()
  }

  /// SHA of HEAD
  pub fn head(&self) -> Result<String> {
    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &str) -> bool {
    self.path.join(path).exists()
  }

  /// Read a file
  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Build a plugin-rail command without CI variables leaking in from the environment
pub fn plugin_rail_cmd(cwd: &Path, args: &[&str]) -> Command {
  let mut cmd = Command::new(env!("CARGO_BIN_EXE_plugin-rail"));
  cmd
    .current_dir(cwd)
    .args(args)
    .env_remove("CI_PREV_COMMIT_SHA")
    .env_remove("CI_COMMIT_SHA")
    .env_remove("RUST_LOG");
  cmd
}

/// Run plugin-rail and return its output whatever the exit status
pub fn run_plugin_rail_raw(cwd: &Path, args: &[&str]) -> Result<Output> {
  plugin_rail_cmd(cwd, args).output().context("Failed to run plugin-rail")
}

/// Run plugin-rail, failing on a non-zero exit status
pub fn run_plugin_rail(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = run_plugin_rail_raw(cwd, args)?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    anyhow::bail!(
      "plugin-rail command failed: plugin-rail {}\nstdout: {}\nstderr: {}",
      args.join(" "),
      stdout,
      stderr
    );
  }

  Ok(output)
}

pub fn stdout(output: &Output) -> String {
  String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
  String::from_utf8_lossy(&output.stderr).to_string()
}
