//! Tests for the `lint` command

use crate::helpers::*;
use anyhow::Result;

fn workspace_with_plugins() -> Result<TestWorkspace> {
  let workspace = TestWorkspace::new()?;
  workspace.add_plugin("ansible")?;
  workspace.add_plugin("terraform")?;
  workspace.commit("feat(ansible): add ansible and terraform plugins")?;
  Ok(workspace)
}

#[test]
fn test_lint_accepts_plugin_scope() -> Result<()> {
  let workspace = workspace_with_plugins()?;

  run_plugin_rail(&workspace.path, &["lint", "--message", "fix(terraform): pin provider version"])?;
  run_plugin_rail(&workspace.path, &["lint", "--message", "docs: describe release flow"])?;

  Ok(())
}

#[test]
fn test_lint_rejects_unknown_scope() -> Result<()> {
  let workspace = workspace_with_plugins()?;

  let output = run_plugin_rail_raw(&workspace.path, &["lint", "--message", "fix(helm): pin chart"])?;
  assert_eq!(output.status.code(), Some(1));

  let out = stdout(&output);
  assert!(out.contains("⧗   input: fix(helm): pin chart"));
  assert!(out.contains("scope must be one of [ansible, terraform] [scope-enum]"));
  assert!(out.contains("found 1 problems, 0 warnings"));
  assert!(stderr(&output).contains("Commit lint failed"));

  Ok(())
}

#[test]
fn test_lint_rejects_non_conventional_header() -> Result<()> {
  let workspace = workspace_with_plugins()?;

  let output = run_plugin_rail_raw(&workspace.path, &["lint", "--message", "updated stuff"])?;
  assert_eq!(output.status.code(), Some(1));

  let out = stdout(&output);
  assert!(out.contains("[type-empty]"));
  assert!(out.contains("[subject-empty]"));

  Ok(())
}

#[test]
fn test_lint_ignores_configured_substring() -> Result<()> {
  let workspace = workspace_with_plugins()?;

  run_plugin_rail(&workspace.path, &["lint", "--message", "Initial plan"])?;
  run_plugin_rail(&workspace.path, &["lint", "--message", "Merge branch 'main' into feature"])?;

  Ok(())
}

#[test]
fn test_lint_edit_strips_comments() -> Result<()> {
  let workspace = workspace_with_plugins()?;
  workspace.write_file(
    ".git/COMMIT_EDITMSG",
    "feat(ansible): add inventory plugin\n\n# Please enter the commit message for your changes.\n# On branch main\n",
  )?;

  run_plugin_rail(&workspace.path, &["lint", "--edit", ".git/COMMIT_EDITMSG"])?;

  Ok(())
}

#[test]
fn test_lint_range_reports_each_bad_commit() -> Result<()> {
  let workspace = workspace_with_plugins()?;
  let base = workspace.head()?;

  workspace.write_file("plugins/ansible/site.yml", "---\n")?;
  workspace.commit("feat(ansible): add site playbook")?;
  workspace.write_file("plugins/terraform/vars.tf", "\n")?;
  workspace.commit("Fix(terraform): Add vars.")?;

  let output = run_plugin_rail_raw(&workspace.path, &["lint", "--from", &base, "--json"])?;
  assert_eq!(output.status.code(), Some(1));

  let reports: serde_json::Value = serde_json::from_str(&stdout(&output))?;
  let reports = reports.as_array().expect("array of reports");
  assert_eq!(reports.len(), 2);
  assert_eq!(reports[0]["valid"], true);
  assert_eq!(reports[1]["valid"], false);

  let rules: Vec<&str> = reports[1]["problems"]
    .as_array()
    .expect("problems")
    .iter()
    .filter_map(|p| p["rule"].as_str())
    .collect();
  assert!(rules.contains(&"type-case"));
  assert!(rules.contains(&"subject-case"));
  assert!(rules.contains(&"subject-full-stop"));

  Ok(())
}

#[test]
fn test_lint_requires_a_source() -> Result<()> {
  let workspace = workspace_with_plugins()?;

  let output = run_plugin_rail_raw(&workspace.path, &["lint"])?;
  assert!(!output.status.success());

  Ok(())
}

#[test]
fn test_lint_message_keeps_header_whitespace() -> Result<()> {
  let workspace = workspace_with_plugins()?;

  let output = run_plugin_rail_raw(&workspace.path, &["lint", "--message", " feat(ansible): add role\n"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(stdout(&output).contains("[header-trim]"));

  Ok(())
}
