//! Sequential per-plugin release execution
//!
//! Plugins are released one at a time in the order they were detected. The
//! first failure aborts the run; plugins after it are not attempted.

use super::manifest::ensure_manifest;
use super::template::ReleaseTemplate;
use crate::core::config::ReleaseConfig;
use crate::core::error::{RailError, RailResult, ReleaseError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

/// Environment variable carrying the plugin name into the release engine
pub const PLUGIN_NAME_ENV: &str = "PLUGIN_NAME";

/// Runs the release command for one plugin
pub trait ReleaseExecutor {
  /// Run `argv` inside `plugin_dir` for `plugin`; Err on spawn failure or non-zero exit
  fn execute(&mut self, plugin: &str, plugin_dir: &Path, argv: &[String]) -> RailResult<()>;
}

/// Spawns the release command as a child process with inherited stdio
pub struct ProcessExecutor {
  /// Send child stdout to our stderr (keeps stdout clean for --json)
  pub stdout_to_stderr: bool,
}

impl ReleaseExecutor for ProcessExecutor {
  fn execute(&mut self, plugin: &str, plugin_dir: &Path, argv: &[String]) -> RailResult<()> {
    let (program, args) = argv.split_first().ok_or(RailError::Release(ReleaseError::EmptyCommand))?;

    let mut cmd = Command::new(program);
    cmd.args(args).current_dir(plugin_dir).env(PLUGIN_NAME_ENV, plugin);
    if self.stdout_to_stderr {
      cmd.stdout(Stdio::from(std::io::stderr()));
    }

    tracing::info!(plugin, program = %program, ?args, dir = %plugin_dir.display(), "running release command");

    let status = cmd.status().map_err(|e| {
      RailError::Release(ReleaseError::SpawnFailed {
        plugin: plugin.to_string(),
        program: program.clone(),
        reason: e.to_string(),
      })
    })?;

    if !status.success() {
      return Err(RailError::Release(ReleaseError::CommandFailed {
        plugin: plugin.to_string(),
        status: status.code(),
      }));
    }

    Ok(())
  }
}

/// What happened to a plugin during the run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum PluginOutcome {
  Released,
  /// Dry-run: would have been released
  Planned,
  /// Directory no longer exists (deleted or renamed in the range)
  Skipped { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct PluginRelease {
  pub plugin: String,
  #[serde(flatten)]
  pub outcome: PluginOutcome,
  /// Placeholder manifest written during this run
  pub manifest_created: bool,
  pub config_path: Option<PathBuf>,
  pub command: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReleaseSummary {
  pub started_at: DateTime<Utc>,
  pub finished_at: DateTime<Utc>,
  pub dry_run: bool,
  pub plugins: Vec<PluginRelease>,
}

impl ReleaseSummary {
  pub fn released(&self) -> impl Iterator<Item = &PluginRelease> {
    self
      .plugins
      .iter()
      .filter(|p| matches!(p.outcome, PluginOutcome::Released | PluginOutcome::Planned))
  }

  pub fn skipped(&self) -> impl Iterator<Item = &PluginRelease> {
    self
      .plugins
      .iter()
      .filter(|p| matches!(p.outcome, PluginOutcome::Skipped { .. }))
  }
}

/// Paths the runner works with
pub struct ReleaseLayout {
  /// Absolute plugins directory
  pub plugins_dir: PathBuf,
  /// Where rendered per-plugin configs are written
  pub config_dir: PathBuf,
}

/// Releases changed plugins one by one
pub struct ReleaseRunner<'a, E: ReleaseExecutor> {
  config: &'a ReleaseConfig,
  layout: ReleaseLayout,
  executor: E,
  dry_run: bool,
  quiet: bool,
}

impl<'a, E: ReleaseExecutor> ReleaseRunner<'a, E> {
  pub fn new(config: &'a ReleaseConfig, layout: ReleaseLayout, executor: E) -> Self {
    Self {
      config,
      layout,
      executor,
      dry_run: false,
      quiet: false,
    }
  }

  pub fn dry_run(mut self, dry_run: bool) -> Self {
    self.dry_run = dry_run;
    self
  }

  /// Suppress human-readable progress (JSON mode)
  pub fn quiet(mut self, quiet: bool) -> Self {
    self.quiet = quiet;
    self
  }

  /// Release each plugin in order, stopping at the first failure
  pub fn run(&mut self, plugins: &[String]) -> RailResult<ReleaseSummary> {
    let started_at = Utc::now();
    let mut results = Vec::with_capacity(plugins.len());

    for plugin in plugins {
      let result = self.release_one(plugin)?;
      results.push(result);
    }

    Ok(ReleaseSummary {
      started_at,
      finished_at: Utc::now(),
      dry_run: self.dry_run,
      plugins: results,
    })
  }

  fn release_one(&mut self, plugin: &str) -> RailResult<PluginRelease> {
    let plugin_dir = self.layout.plugins_dir.join(plugin);

    if !plugin_dir.is_dir() {
      tracing::info!(plugin, "plugin directory missing, skipping");
      if !self.quiet {
        println!("⏭️  Skipping {} (no longer in {})", plugin, self.layout.plugins_dir.display());
      }
      return Ok(PluginRelease {
        plugin: plugin.to_string(),
        outcome: PluginOutcome::Skipped {
          reason: "directory not found".to_string(),
        },
        manifest_created: false,
        config_path: None,
        command: Vec::new(),
      });
    }

    let template = ReleaseTemplate::new(self.config);
    let config_path = self.layout.config_dir.join(format!("{}.json", plugin));
    let command = expand_command(&self.config.command, plugin, &config_path);

    if !self.quiet {
      println!();
      println!("🚀 Releasing plugin: {}", plugin);
    }

    if self.dry_run {
      if !self.quiet {
        if !plugin_dir.join(&self.config.manifest).exists() {
          println!("   Would create {}", self.config.manifest);
        }
        println!("   Would write {}", config_path.display());
        println!("   Would run: {}", command.join(" "));
      }
      return Ok(PluginRelease {
        plugin: plugin.to_string(),
        outcome: PluginOutcome::Planned,
        manifest_created: false,
        config_path: Some(config_path),
        command,
      });
    }

    let created = ensure_manifest(
      &plugin_dir,
      &self.config.manifest,
      plugin,
      &self.config.initial_version,
    )?;
    if created.is_some() && !self.quiet {
      println!("   Created {}", self.config.manifest);
    }

    let config_path = template.write(&self.layout.config_dir, plugin)?;
    self.executor.execute(plugin, &plugin_dir, &command)?;

    if !self.quiet {
      println!("   ✅ {} released", plugin);
    }

    Ok(PluginRelease {
      plugin: plugin.to_string(),
      outcome: PluginOutcome::Released,
      manifest_created: created.is_some(),
      config_path: Some(config_path),
      command,
    })
  }
}

/// Substitute `{config}` and `{plugin}` in the command template
pub fn expand_command(template: &[String], plugin: &str, config_path: &Path) -> Vec<String> {
  let config = config_path.to_string_lossy();
  template
    .iter()
    .map(|arg| arg.replace("{config}", &config).replace("{plugin}", plugin))
    .collect()
}
