//! `plugin-rail release` - Release every plugin changed in a revision range
//!
//! Plugins are released sequentially; the first failure stops the run and the
//! process exits non-zero.

use crate::core::context::WorkspaceContext;
use crate::core::error::{RailError, RailResult};
use crate::plugins::{DiffRange, changes};
use crate::release::{ProcessExecutor, ReleaseLayout, ReleaseRunner, ReleaseSummary, ReleaseTemplate};

/// Run the release command
pub fn run_release(
  ctx: &WorkspaceContext,
  from: Option<String>,
  to: Option<String>,
  dry_run: bool,
  json: bool,
) -> RailResult<()> {
  let range = DiffRange::resolve(from.as_deref(), to.as_deref());
  let change_set = changes::detect(ctx.workspace_root(), &ctx.config.workspace.plugins_dir, range)?;

  if !json {
    println!("🔍 Comparing {}", change_set.range);
    if change_set.plugins.is_empty() {
      println!("\nNo plugins changed, nothing to release.");
    } else {
      println!("   Changed plugins: {}", change_set.plugins.join(", "));
    }
  }

  let layout = ReleaseLayout {
    plugins_dir: ctx.plugins_dir(),
    config_dir: ctx.release_config_dir(),
  };
  let executor = ProcessExecutor { stdout_to_stderr: json };

  let summary = ReleaseRunner::new(&ctx.config.release, layout, executor)
    .dry_run(dry_run)
    .quiet(json)
    .run(&change_set.plugins)?;

  if json {
    println!("{}", serde_json::to_string_pretty(&summary)?);
  } else if !summary.plugins.is_empty() {
    print_summary(&summary);
  }

  Ok(())
}

fn print_summary(summary: &ReleaseSummary) {
  let released: Vec<&str> = summary.released().map(|p| p.plugin.as_str()).collect();
  let skipped: Vec<&str> = summary.skipped().map(|p| p.plugin.as_str()).collect();

  println!();
  if summary.dry_run {
    println!("📋 Dry run: {} plugin(s) would be released", released.len());
  } else {
    let elapsed = summary.finished_at - summary.started_at;
    println!(
      "✅ Released {} plugin(s) in {}s",
      released.len(),
      elapsed.num_seconds()
    );
  }
  if !released.is_empty() {
    println!("   {}", released.join(", "));
  }
  if !skipped.is_empty() {
    println!("⏭️  Skipped {} (directory removed): {}", skipped.len(), skipped.join(", "));
  }
}

/// Run the release-config command: print the rendered config for one plugin
pub fn run_release_config(ctx: &WorkspaceContext, plugin: String) -> RailResult<()> {
  if !ctx.plugin_dir(&plugin).is_dir() {
    return Err(RailError::with_help(
      format!("Plugin '{}' not found in {}", plugin, ctx.plugins_dir().display()),
      "Run `plugin-rail scopes` to list plugins.",
    ));
  }

  let rendered = ReleaseTemplate::new(&ctx.config.release).render(&plugin);
  println!("{}", serde_json::to_string_pretty(&rendered)?);
  Ok(())
}
