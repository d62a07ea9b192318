//! Commit lint rules
//!
//! The rule set and messages follow `@commitlint/config-conventional`, with
//! `scope-enum` driven by the plugin directories.

use super::commit::ConventionalCommit;
use crate::core::config::LintConfig;
use crate::core::error::RailResult;
use crate::plugins::ScopeSet;
use regex::Regex;
use serde::Serialize;

/// Commit types accepted by `type-enum`
pub const COMMIT_TYPES: &[&str] = &[
  "build", "chore", "ci", "docs", "feat", "fix", "perf", "refactor", "revert", "style", "test",
];

/// Messages matching these are never linted (merges, reverts, autosquash commits).
/// Version bump commits are handled by `is_version_commit`.
const DEFAULT_IGNORES: &[&str] = &[
  r"(?m)^((Merge pull request(.*))|(Merge (.*?) into (.*?))|(Merge branch (.*?)))(?:\r?\n)*$",
  r"(?m)^(Merge tag (.*?))(?:\r?\n)*$",
  r"^(R|r)evert (.*)",
  r"^(amend|fixup|squash)!",
  r"^(Merged (.*?)(in|into) (.*))",
  r"^(Merged PR (.*): (.*))",
  r"^(Merge remote-tracking branch (.*))",
  r"^(Automatic merge(.*))",
  r"^(Auto-merged (.*?) into (.*))",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
  Warning,
  Error,
}

/// A single rule violation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
  pub level: Level,
  pub rule: &'static str,
  pub message: String,
}

/// Lint outcome for one commit message
#[derive(Debug, Clone, Serialize)]
pub struct LintReport {
  pub input: String,
  pub ignored: bool,
  /// Has a `!` marker or a `BREAKING CHANGE` footer
  pub breaking: bool,
  pub problems: Vec<Problem>,
}

impl LintReport {
  pub fn errors(&self) -> usize {
    self.problems.iter().filter(|p| p.level == Level::Error).count()
  }

  pub fn warnings(&self) -> usize {
    self.problems.iter().filter(|p| p.level == Level::Warning).count()
  }

  pub fn is_valid(&self) -> bool {
    self.errors() == 0
  }
}

/// Commit message linter with a fixed scope allow-list
pub struct Linter {
  scopes: ScopeSet,
  config: LintConfig,
  ignores: Vec<Regex>,
}

impl Linter {
  pub fn new(scopes: ScopeSet, config: LintConfig) -> RailResult<Self> {
    let ignores = DEFAULT_IGNORES
      .iter()
      .map(|pattern| Regex::new(pattern))
      .collect::<Result<Vec<_>, _>>()?;

    Ok(Self {
      scopes,
      config,
      ignores,
    })
  }

  pub fn scopes(&self) -> &ScopeSet {
    &self.scopes
  }

  /// Whether a message is exempt from linting
  pub fn is_ignored(&self, message: &str) -> bool {
    self
      .config
      .ignore_containing
      .iter()
      .any(|needle| !needle.is_empty() && message.contains(needle.as_str()))
      || self.ignores.iter().any(|re| re.is_match(message))
      || is_version_commit(message)
  }

  /// Lint one commit message
  pub fn lint(&self, message: &str) -> LintReport {
    let input = message.lines().next().unwrap_or_default().to_string();

    if self.is_ignored(message) {
      return LintReport {
        input,
        ignored: true,
        breaking: false,
        problems: Vec::new(),
      };
    }

    let commit = ConventionalCommit::parse(message);
    let mut problems = Vec::new();

    self.check_header(&commit, &mut problems);
    self.check_type(&commit, &mut problems);
    self.check_scope(&commit, &mut problems);
    self.check_subject(&commit, &mut problems);
    self.check_body_and_footer(&commit, &mut problems);

    LintReport {
      input,
      ignored: false,
      breaking: commit.is_breaking(),
      problems,
    }
  }

  fn check_header(&self, commit: &ConventionalCommit, problems: &mut Vec<Problem>) {
    let max = self.config.header_max_length;
    let len = commit.header.chars().count();
    if len > max {
      problems.push(error(
        "header-max-length",
        format!("header must not be longer than {} characters, current length is {}", max, len),
      ));
    }

    if commit.header.trim() != commit.header {
      problems.push(error("header-trim", "header must not be surrounded by whitespace"));
    }
  }

  fn check_type(&self, commit: &ConventionalCommit, problems: &mut Vec<Problem>) {
    let commit_type = commit.commit_type.as_deref().unwrap_or_default();
    if commit_type.is_empty() {
      problems.push(error("type-empty", "type may not be empty"));
      return;
    }

    if commit_type != commit_type.to_lowercase() {
      problems.push(error("type-case", "type must be lower-case"));
    }

    if !COMMIT_TYPES.contains(&commit_type) {
      problems.push(error(
        "type-enum",
        format!("type must be one of [{}]", COMMIT_TYPES.join(", ")),
      ));
    }
  }

  fn check_scope(&self, commit: &ConventionalCommit, problems: &mut Vec<Problem>) {
    let scopes = commit.scopes();

    if scopes.is_empty() {
      if self.config.require_scope {
        problems.push(error("scope-empty", "scope may not be empty"));
      }
      return;
    }

    // An empty allow-list accepts any scope
    if !self.scopes.is_empty() && !scopes.iter().all(|s| self.scopes.contains(s)) {
      let allowed: Vec<&str> = self.scopes.iter().collect();
      problems.push(error(
        "scope-enum",
        format!("scope must be one of [{}]", allowed.join(", ")),
      ));
    }
  }

  fn check_subject(&self, commit: &ConventionalCommit, problems: &mut Vec<Problem>) {
    let subject = commit.subject.as_deref().unwrap_or_default();
    if subject.trim().is_empty() {
      problems.push(error("subject-empty", "subject may not be empty"));
      return;
    }

    if forbidden_subject_case(subject) {
      problems.push(error(
        "subject-case",
        "subject must not be sentence-case, start-case, pascal-case, upper-case",
      ));
    }

    if subject.trim_end().ends_with('.') {
      problems.push(error("subject-full-stop", "subject may not end with full stop"));
    }
  }

  fn check_body_and_footer(&self, commit: &ConventionalCommit, problems: &mut Vec<Problem>) {
    let max = self.config.line_max_length;

    if commit.has_body() {
      if !commit.body_leading_blank {
        problems.push(warning("body-leading-blank", "body must have leading blank line"));
      }
      if commit.body.iter().any(|l| l.chars().count() > max) {
        problems.push(error(
          "body-max-line-length",
          format!("body's lines must not be longer than {} characters", max),
        ));
      }
    }

    if commit.has_footer() {
      if !commit.footer_leading_blank {
        problems.push(warning("footer-leading-blank", "footer must have leading blank line"));
      }
      if commit.footer.iter().any(|l| l.chars().count() > max) {
        problems.push(error(
          "footer-max-line-length",
          format!("footer's lines must not be longer than {} characters", max),
        ));
      }
    }
  }
}

fn error(rule: &'static str, message: impl Into<String>) -> Problem {
  Problem {
    level: Level::Error,
    rule,
    message: message.into(),
  }
}

fn warning(rule: &'static str, message: impl Into<String>) -> Problem {
  Problem {
    level: Level::Warning,
    rule,
    message: message.into(),
  }
}

/// Sentence-case, start-case, pascal-case or upper-case subjects are rejected
///
/// All four start with an uppercase letter, so the first character decides.
/// Subjects not starting with an ASCII letter (`123 fixes`, `"quoted"`) pass.
fn forbidden_subject_case(subject: &str) -> bool {
  subject.trim_start().starts_with(|c: char| c.is_ascii_uppercase())
}

/// A first line that is only a version, optionally as `chore(scope): <version>`
fn is_version_commit(message: &str) -> bool {
  let first_line = message.lines().next().unwrap_or_default().trim();
  let stripped = first_line
    .strip_prefix("chore")
    .and_then(|rest| {
      let rest = match rest.strip_prefix('(') {
        Some(scoped) => scoped.split_once(')').map(|(_, after)| after)?,
        None => rest,
      };
      rest.strip_prefix(':')
    })
    .unwrap_or(first_line)
    .trim();
  let version = stripped.trim_start_matches(['v', '=']);

  semver::Version::parse(version).is_ok()
}
