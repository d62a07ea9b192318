//! Tests for the `changed` command

use crate::helpers::*;
use anyhow::Result;

#[test]
fn test_changed_between_explicit_revisions() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  let base = workspace.head()?;

  workspace.add_plugin("terraform")?;
  workspace.add_plugin("ansible")?;
  workspace.write_file("docs/guide.md", "guide\n")?;
  workspace.commit("feat(terraform): add terraform and ansible")?;
  workspace.write_file("plugins/terraform/outputs.tf", "\n")?;
  let head = workspace.commit("fix(terraform): add outputs")?;

  let output = run_plugin_rail(
    &workspace.path,
    &["changed", "--from", &base, "--to", &head, "--format", "names-only"],
  )?;
  let names: Vec<String> = stdout(&output).lines().map(String::from).collect();
  // git diff lists paths sorted
  assert_eq!(names, vec!["ansible", "terraform"]);

  Ok(())
}

#[test]
fn test_changed_zero_sha_falls_back_to_previous_commit() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.add_plugin("ansible")?;
  workspace.commit("feat(ansible): add ansible")?;
  workspace.add_plugin("helm")?;
  workspace.commit("feat(helm): add helm")?;

  let output = plugin_rail_cmd(&workspace.path, &["changed", "--format", "json"])
    .env("CI_PREV_COMMIT_SHA", "0000000000000000000000000000000000000000")
    .output()?;
  assert!(output.status.success(), "stderr: {}", stderr(&output));

  let change_set: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  assert_eq!(change_set["range"]["from"], "HEAD~1");
  assert_eq!(change_set["range"]["to"], "HEAD");
  assert_eq!(change_set["plugins"], serde_json::json!(["helm"]));

  Ok(())
}

#[test]
fn test_changed_reads_ci_environment() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  let base = workspace.head()?;
  workspace.add_plugin("ansible")?;
  let middle = workspace.commit("feat(ansible): add ansible")?;
  workspace.add_plugin("helm")?;
  workspace.commit("feat(helm): add helm")?;

  let output = plugin_rail_cmd(&workspace.path, &["changed", "--format", "names-only"])
    .env("CI_PREV_COMMIT_SHA", &base)
    .env("CI_COMMIT_SHA", &middle)
    .output()?;
  assert!(output.status.success(), "stderr: {}", stderr(&output));
  assert_eq!(stdout(&output).trim(), "ansible");

  Ok(())
}

#[test]
fn test_changed_ignores_files_outside_plugins() -> Result<()> {
  let workspace = TestWorkspace::new()?;
  workspace.write_file("README.md", "# Plugins\n\nUpdated.\n")?;
  workspace.commit("docs: update readme")?;

  let output = run_plugin_rail(&workspace.path, &["changed", "--format", "json"])?;
  let change_set: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  assert_eq!(change_set["plugins"], serde_json::json!([]));
  assert_eq!(change_set["changed_files"], serde_json::json!(["README.md"]));

  Ok(())
}

#[test]
fn test_changed_unknown_revision_fails() -> Result<()> {
  let workspace = TestWorkspace::new()?;

  let output = run_plugin_rail_raw(&workspace.path, &["changed", "--from", "does-not-exist"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stderr(&output).contains("Git command failed"));

  Ok(())
}
