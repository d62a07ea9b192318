//! Tests for the `init` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_init_creates_config() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_plugin("ansible")?;

  let output = run_plugin_rail(&workspace.path, &["init"])?;
  assert!(stdout(&output).contains("Found 1 plugin(s): ansible"));

  let config = workspace.read_file("plugin-rail.toml")?;
  assert!(config.contains("[workspace]"));
  assert!(config.contains("plugins_dir = \"plugins\""));
  assert!(config.contains("[release]"));
  assert!(config.contains("semantic-release"));

  // The written file loads back cleanly
  run_plugin_rail(&workspace.path, &["scopes"])?;

  Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_config("[workspace]\nplugins_dir = \"addons\"\n")?;

  let output = run_plugin_rail_raw(&workspace.path, &["init"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("--force"));

  run_plugin_rail(&workspace.path, &["init", "--force"])?;
  let config = workspace.read_file("plugin-rail.toml")?;
  // Values from the existing config are kept
  assert!(config.contains("plugins_dir = \"addons\""));

  Ok(())
}

#[test]
fn test_init_force_replaces_invalid_config() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_config("[release]\ncommand = []\n")?;

  assert!(run_plugin_rail(&workspace.path, &["scopes"]).is_err());

  run_plugin_rail(&workspace.path, &["init", "--force"])?;
  run_plugin_rail(&workspace.path, &["scopes"])?;

  Ok(())
}

#[test]
fn test_init_installs_commit_msg_hook() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  run_plugin_rail(&workspace.path, &["init", "--hook"])?;

  let hook = workspace.read_file(".git/hooks/commit-msg")?;
  assert!(hook.starts_with("#!/bin/sh"));
  assert!(hook.contains("plugin-rail lint --edit \"$1\""));

  Ok(())
}
