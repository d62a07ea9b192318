//! `plugin-rail scopes` - List the commit scopes accepted by the linter

use crate::core::context::WorkspaceContext;
use crate::core::error::RailResult;
use crate::plugins::ScopeSet;

/// Run the scopes command
pub fn run_scopes(ctx: &WorkspaceContext, json: bool) -> RailResult<()> {
  let scopes = ScopeSet::discover(&ctx.plugins_dir(), &ctx.config.lint.extra_scopes)?;
  let names: Vec<&str> = scopes.iter().collect();

  if json {
    println!("{}", serde_json::to_string_pretty(&names)?);
    return Ok(());
  }

  if names.is_empty() {
    println!("⚠️  No plugins found in {}", ctx.config.workspace.plugins_dir.display());
    println!("   Any scope will be accepted until a plugin directory exists.");
    return Ok(());
  }

  println!("Valid commit scopes ({}):", scopes.len());
  for name in names {
    println!("  {}", name);
  }

  Ok(())
}
