//! `plugin-rail lint` - Validate commit messages
//!
//! Output mirrors commitlint so existing CI logs and habits carry over:
//!
//! ```text
//! ⧗   input: fix(helm): pin chart version
//! ✖   scope must be one of [ansible, terraform] [scope-enum]
//!
//! ✖   found 1 problems, 0 warnings
//! ```

use crate::core::context::WorkspaceContext;
use crate::core::error::{LintError, RailError, RailResult};
use crate::lint::{Level, LintReport, LintSource, Linter};
use crate::plugins::ScopeSet;
use serde_json::json;

/// Run the lint command
pub fn run_lint(ctx: &WorkspaceContext, source: LintSource, json: bool) -> RailResult<()> {
  let scopes = ScopeSet::discover(&ctx.plugins_dir(), &ctx.config.lint.extra_scopes)?;
  let linter = Linter::new(scopes, ctx.config.lint.clone())?;
  tracing::debug!(scopes = linter.scopes().len(), "loaded scope allow-list");

  let inputs = source.collect(ctx.workspace_root())?;
  let mut reports = Vec::with_capacity(inputs.len());
  for input in &inputs {
    let report = linter.lint(&input.message);
    tracing::debug!(sha = ?input.sha, errors = report.errors(), ignored = report.ignored, "linted commit");
    reports.push(report);
  }

  if json {
    let entries: Vec<_> = inputs
      .iter()
      .zip(&reports)
      .map(|(input, report)| {
        json!({
          "sha": input.sha,
          "author": input.author,
          "input": report.input,
          "ignored": report.ignored,
          "valid": report.is_valid(),
          "breaking": report.breaking,
          "problems": report.problems,
        })
      })
      .collect();
    println!("{}", serde_json::to_string_pretty(&entries)?);
  } else {
    for (input, report) in inputs.iter().zip(&reports) {
      print_report(input.sha.as_deref(), input.author.as_deref(), report);
    }
    if inputs.is_empty() {
      println!("No commits to lint.");
    }
  }

  let failing: Vec<&LintReport> = reports.iter().filter(|r| !r.is_valid()).collect();
  if failing.is_empty() {
    return Ok(());
  }

  Err(RailError::Lint(LintError::Rejected {
    commits: failing.len(),
    errors: failing.iter().map(|r| r.errors()).sum(),
  }))
}

fn print_report(sha: Option<&str>, author: Option<&str>, report: &LintReport) {
  let origin = match (sha, author) {
    (Some(sha), Some(author)) => format!(" ({} by {})", short_sha(sha), author),
    (Some(sha), None) => format!(" ({})", short_sha(sha)),
    _ => String::new(),
  };

  if report.ignored {
    println!("⏭️  ignored: {}{}", report.input, origin);
    return;
  }

  if report.problems.is_empty() {
    println!("✅  {}{}", report.input, origin);
    return;
  }

  println!("⧗   input: {}{}", report.input, origin);
  for problem in &report.problems {
    let sign = match problem.level {
      Level::Error => "✖",
      Level::Warning => "⚠",
    };
    println!("{}   {} [{}]", sign, problem.message, problem.rule);
  }
  println!();

  let sign = if report.is_valid() { "⚠" } else { "✖" };
  println!(
    "{}   found {} problems, {} warnings",
    sign,
    report.errors(),
    report.warnings()
  );
  println!();
}

fn short_sha(sha: &str) -> &str {
  sha.get(..7).unwrap_or(sha)
}
