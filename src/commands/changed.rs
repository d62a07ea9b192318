//! `plugin-rail changed` - Show which plugins changed between two revisions

use crate::core::context::WorkspaceContext;
use crate::core::error::{RailError, RailResult};
use crate::plugins::{ChangeSet, DiffRange, changes};

/// Output format for changed command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
  Text,
  Json,
  NamesOnly,
}

impl OutputFormat {
  pub fn from_str(s: &str) -> RailResult<Self> {
    match s.to_lowercase().as_str() {
      "text" => Ok(Self::Text),
      "json" => Ok(Self::Json),
      "names" | "names-only" => Ok(Self::NamesOnly),
      _ => Err(RailError::message(format!(
        "Unknown format '{}'. Valid formats: text, json, names-only",
        s
      ))),
    }
  }
}

/// Run the changed command
pub fn run_changed(ctx: &WorkspaceContext, from: Option<String>, to: Option<String>, format: String) -> RailResult<()> {
  let output_format = OutputFormat::from_str(&format)?;
  let range = DiffRange::resolve(from.as_deref(), to.as_deref());

  let change_set = changes::detect(ctx.workspace_root(), &ctx.config.workspace.plugins_dir, range)?;
  display_results(&change_set, output_format)
}

fn display_results(change_set: &ChangeSet, format: OutputFormat) -> RailResult<()> {
  match format {
    OutputFormat::Text => {
      println!("Comparing {}", change_set.range);
      if change_set.range.is_fallback() {
        println!("   (no previous revision given, using the parent of the current commit)");
      }
      println!("   {} file(s) changed", change_set.changed_files.len());

      if change_set.plugins.is_empty() {
        println!("\nNo plugins changed.");
      } else {
        println!("\nChanged plugins ({}):", change_set.plugins.len());
        for plugin in &change_set.plugins {
          println!("  {}", plugin);
        }
      }
    }
    OutputFormat::Json => {
      println!("{}", serde_json::to_string_pretty(change_set)?);
    }
    OutputFormat::NamesOnly => {
      for plugin in &change_set.plugins {
        println!("{}", plugin);
      }
    }
  }

  Ok(())
}
