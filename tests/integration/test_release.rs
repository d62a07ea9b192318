//! Tests for the `release` and `release-config` commands
//!
//! The release engine is replaced by a shell command so the tests can observe
//! where and how it was invoked.

use crate::helpers::*;
use anyhow::Result;

/// Appends "<plugin> <cwd basename> <config basename>" to ../../released.log
const RECORDING_CONFIG: &str = r#"
[release]
command = ["sh", "-c", "echo \"$PLUGIN_NAME $(basename \"$PWD\") $(basename \"$0\")\" >> ../../released.log", "{config}"]
"#;

fn released_log(workspace: &TestWorkspace) -> Result<Vec<String>> {
  if !workspace.file_exists("released.log") {
    return Ok(Vec::new());
  }
  Ok(workspace.read_file("released.log")?.lines().map(String::from).collect())
}

#[test]
fn test_release_runs_command_per_changed_plugin() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_config(RECORDING_CONFIG)?;
  workspace.add_plugin("ansible")?;
  workspace.add_plugin("terraform")?;
  workspace.commit("feat(ansible): add plugins")?;

  run_plugin_rail(&workspace.path, &["release"])?;

  assert_eq!(
    released_log(&workspace)?,
    vec!["ansible ansible ansible.json", "terraform terraform terraform.json"]
  );

  Ok(())
}

#[test]
fn test_release_creates_placeholder_manifest_and_config() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_config(RECORDING_CONFIG)?;
  workspace.add_plugin("ansible")?;
  workspace.write_file("plugins/helm/package.json", "{\"name\":\"helm\",\"version\":\"2.1.0\"}")?;
  workspace.commit("feat(ansible): add plugins")?;

  run_plugin_rail(&workspace.path, &["release"])?;

  let manifest: serde_json::Value = serde_json::from_str(&workspace.read_file("plugins/ansible/package.json")?)?;
  assert_eq!(
    manifest,
    serde_json::json!({ "name": "ansible", "version": "0.0.0-dev", "private": true })
  );
  assert!(workspace.read_file("plugins/ansible/package.json")?.contains("\n  \"name\""));

  // Existing manifests are left alone
  assert_eq!(
    workspace.read_file("plugins/helm/package.json")?,
    "{\"name\":\"helm\",\"version\":\"2.1.0\"}"
  );

  let config: serde_json::Value = serde_json::from_str(&workspace.read_file(".plugin-rail/release/ansible.json")?)?;
  assert_eq!(config["tagFormat"], "ansible-v${version}");

  Ok(())
}

#[test]
fn test_release_skips_removed_plugin() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_config(RECORDING_CONFIG)?;
  workspace.add_plugin("ansible")?;
  workspace.add_plugin("legacy")?;
  workspace.commit("feat(ansible): add plugins")?;

  std::fs::remove_dir_all(workspace.path.join("plugins/legacy"))?;
  workspace.write_file("plugins/ansible/site.yml", "---\n")?;
  workspace.commit("fix(ansible): remove legacy plugin")?;

  let output = run_plugin_rail(&workspace.path, &["release", "--json"])?;
  let summary: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  let statuses: Vec<(&str, &str)> = summary["plugins"]
    .as_array()
    .expect("plugins")
    .iter()
    .map(|p| (p["plugin"].as_str().unwrap_or_default(), p["status"].as_str().unwrap_or_default()))
    .collect();
  assert_eq!(statuses, vec![("ansible", "released"), ("legacy", "skipped")]);

  assert_eq!(released_log(&workspace)?, vec!["ansible ansible ansible.json"]);

  Ok(())
}

#[test]
fn test_release_stops_at_first_failure() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_config(
    r#"
[release]
command = ["sh", "-c", "echo \"$PLUGIN_NAME\" >> ../../released.log; [ \"$PLUGIN_NAME\" != ansible ]"]
"#,
  )?;
  workspace.add_plugin("ansible")?;
  workspace.add_plugin("terraform")?;
  workspace.commit("feat(ansible): add plugins")?;

  let output = run_plugin_rail_raw(&workspace.path, &["release"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Release of plugin 'ansible' failed with exit code 1"));

  assert_eq!(released_log(&workspace)?, vec!["ansible"]);
  assert!(!workspace.file_exists("plugins/terraform/package.json"));

  Ok(())
}

#[test]
fn test_release_missing_program_fails() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_config("[release]\ncommand = [\"plugin-rail-missing-release-tool\"]\n")?;
  workspace.add_plugin("ansible")?;
  workspace.commit("feat(ansible): add plugin")?;

  let output = run_plugin_rail_raw(&workspace.path, &["release"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Failed to start `plugin-rail-missing-release-tool`"));

  Ok(())
}

#[test]
fn test_release_dry_run_changes_nothing() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_config(RECORDING_CONFIG)?;
  workspace.add_plugin("ansible")?;
  workspace.commit("feat(ansible): add plugin")?;

  let output = run_plugin_rail(&workspace.path, &["release", "--dry-run"])?;
  assert!(stdout(&output).contains("Would run: sh -c"));

  assert!(released_log(&workspace)?.is_empty());
  assert!(!workspace.file_exists("plugins/ansible/package.json"));
  assert!(!workspace.file_exists(".plugin-rail"));

  Ok(())
}

#[test]
fn test_release_without_changes_is_noop() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_config(RECORDING_CONFIG)?;
  workspace.add_plugin("ansible")?;
  workspace.commit("feat(ansible): add plugin")?;
  workspace.write_file("README.md", "changed\n")?;
  workspace.commit("docs: readme")?;

  let output = run_plugin_rail(&workspace.path, &["release"])?;
  assert!(stdout(&output).contains("nothing to release"));
  assert!(released_log(&workspace)?.is_empty());

  Ok(())
}

#[test]
fn test_release_config_prints_rendered_json() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_plugin("terraform")?;

  let output = run_plugin_rail(&workspace.path, &["release-config", "terraform"])?;
  let config: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  assert_eq!(config["extends"], "semantic-release-monorepo");
  assert_eq!(config["tagFormat"], "terraform-v${version}");

  let output = run_plugin_rail_raw(&workspace.path, &["release-config", "nope"])?;
  assert_eq!(output.status.code(), Some(1));

  Ok(())
}
