//! Conventional commit message parsing for the linter
//!
//! Format: `<type>(<scope>)!: <subject>`, an optional body, optional footers.
//! Unlike a changelog parser this never rejects input: a header that does not
//! match yields empty type/subject so the rules can report what is missing.

use winnow::combinator::{opt, preceded, terminated};
use winnow::prelude::*;
use winnow::token::{take_till, take_while};

/// A parsed commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionalCommit {
  /// First line, untrimmed
  pub header: String,
  /// Commit type as written (may be empty or mixed case)
  pub commit_type: Option<String>,
  /// Raw scope text between parentheses
  pub scope: Option<String>,
  /// Short description after `: `
  pub subject: Option<String>,
  /// `!` marker after type/scope
  pub breaking_marker: bool,
  /// Body lines (between header and footers)
  pub body: Vec<String>,
  /// Footer lines (`Key: value`, `Key #value`, `BREAKING CHANGE: ...`)
  pub footer: Vec<String>,
  /// Parsed footers as (token, value)
  pub footers: Vec<(String, String)>,
  /// The raw line right after the header is blank (or absent)
  pub body_leading_blank: bool,
  /// The raw line before the first footer is blank
  pub footer_leading_blank: bool,
}

impl ConventionalCommit {
  /// Parse a commit message (comments already stripped)
  pub fn parse(message: &str) -> Self {
    let message = trim_trailing_newlines(message);
    let lines: Vec<&str> = message.lines().collect();
    let header = lines.first().copied().unwrap_or_default().to_string();

    let parsed = parse_header(&header);
    let (commit_type, scope, breaking_marker, subject) = match parsed {
      Some((t, s, b, d)) => (Some(t), s, b, Some(d)),
      None => (None, None, false, None),
    };

    let rest = if lines.len() > 1 { &lines[1..] } else { &[][..] };
    let footer_start = find_footer_start(rest);

    let (body_raw, footer_raw) = match footer_start {
      Some(idx) => (&rest[..idx], &rest[idx..]),
      None => (rest, &[][..]),
    };

    let body: Vec<String> = trim_blank_edges(body_raw).iter().map(|l| l.to_string()).collect();
    let footer: Vec<String> = trim_blank_edges(footer_raw).iter().map(|l| l.to_string()).collect();

    let body_leading_blank = rest.first().is_none_or(|l| l.trim().is_empty());
    let footer_leading_blank = match footer_start {
      // rest[idx - 1] is the raw line before the footer; idx == 0 means it directly follows the header
      Some(0) => false,
      Some(idx) => rest[idx - 1].trim().is_empty(),
      None => true,
    };

    Self {
      header,
      commit_type,
      scope,
      subject,
      breaking_marker,
      footers: parse_footers(&footer),
      body,
      footer,
      body_leading_blank,
      footer_leading_blank,
    }
  }

  /// Individual scopes (`a,b`, `a/b`, `a\b` all name two scopes)
  pub fn scopes(&self) -> Vec<&str> {
    match &self.scope {
      Some(scope) if !scope.is_empty() => split_scopes(scope),
      _ => Vec::new(),
    }
  }

  /// Check if this commit is a breaking change
  pub fn is_breaking(&self) -> bool {
    self.breaking_marker
      || self
        .footers
        .iter()
        .any(|(key, _)| key.eq_ignore_ascii_case("BREAKING CHANGE") || key.eq_ignore_ascii_case("BREAKING-CHANGE"))
  }

  pub fn has_body(&self) -> bool {
    !self.body.is_empty()
  }

  pub fn has_footer(&self) -> bool {
    !self.footer.is_empty()
  }
}

type Header = (String, Option<String>, bool, String);

/// Parse `type(scope)!: subject`
fn parse_header(header: &str) -> Option<Header> {
  let mut parser = (
    take_while::<_, _, ()>(0.., |c: char| c.is_alphanumeric() || c == '_'),
    opt(preceded('(', terminated(take_till(0.., ')'), ')'))),
    opt('!'),
    ": ",
    winnow::token::rest,
  );

  let (commit_type, scope, bang, _, subject): (&str, Option<&str>, Option<char>, &str, &str) =
    parser.parse(header).ok()?;

  Some((
    commit_type.to_string(),
    scope.map(str::to_string),
    bang.is_some(),
    subject.to_string(),
  ))
}

/// Split a scope on `/`, `\` and `,` (optionally followed by a space)
fn split_scopes(scope: &str) -> Vec<&str> {
  scope
    .split(['/', '\\', ','])
    .map(|s| s.strip_prefix(' ').unwrap_or(s))
    .collect()
}

/// Index (into the lines after the header) where footers begin
///
/// `BREAKING CHANGE:` starts a footer anywhere; other trailers only after a blank line.
fn find_footer_start(rest: &[&str]) -> Option<usize> {
  let mut after_blank = false;

  for (idx, line) in rest.iter().enumerate() {
    let trimmed = line.trim();
    if trimmed.is_empty() {
      after_blank = true;
      continue;
    }
    if is_breaking_token(trimmed) {
      return Some(idx);
    }
    if after_blank && is_trailer(trimmed) {
      return Some(idx);
    }
    after_blank = false;
  }

  None
}

fn is_breaking_token(line: &str) -> bool {
  line.starts_with("BREAKING CHANGE:") || line.starts_with("BREAKING-CHANGE:")
}

/// `Token: value` or `Token #value`
fn is_trailer(line: &str) -> bool {
  let token_end = line
    .find(|c: char| !(c.is_alphanumeric() || c == '-' || c == '_'))
    .unwrap_or(line.len());
  if token_end == 0 {
    return false;
  }
  let after = &line[token_end..];
  after.starts_with(": ") || after.starts_with(" #")
}

fn parse_footers(footer: &[String]) -> Vec<(String, String)> {
  let mut footers: Vec<(String, String)> = Vec::new();

  for line in footer {
    let trimmed = line.trim();
    if trimmed.is_empty() {
      continue;
    }

    let pair = if is_breaking_token(trimmed) || is_trailer(trimmed) {
      trimmed
        .split_once(": ")
        .or_else(|| trimmed.split_once(" #"))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
    } else {
      None
    };

    if let Some(pair) = pair {
      footers.push(pair);
    } else if let Some((_, value)) = footers.last_mut() {
      // Continuation of the previous footer's value
      value.push('\n');
      value.push_str(trimmed);
    }
  }

  footers
}

fn trim_blank_edges<'a>(lines: &'a [&'a str]) -> &'a [&'a str] {
  let start = lines.iter().position(|l| !l.trim().is_empty()).unwrap_or(lines.len());
  let end = lines
    .iter()
    .rposition(|l| !l.trim().is_empty())
    .map(|i| i + 1)
    .unwrap_or(start);
  &lines[start..end.max(start)]
}

/// Remove git comment lines and everything below the scissors line
pub fn strip_comments(message: &str) -> String {
  let mut kept = Vec::new();
  for line in message.lines() {
    if line.starts_with("# ------------------------ >8 ------------------------") {
      break;
    }
    if line.starts_with('#') {
      continue;
    }
    kept.push(line);
  }
  trim_trailing_newlines(&kept.join("\n")).to_string()
}

/// Drop trailing blank lines; the header keeps any surrounding whitespace for `header-trim`
pub fn trim_trailing_newlines(message: &str) -> &str {
  let mut rest = message;
  loop {
    let trimmed = rest.trim_end_matches(['\n', '\r']);
    match trimmed.rfind('\n') {
      Some(idx) if trimmed[idx + 1..].trim().is_empty() => rest = &trimmed[..idx],
      None if trimmed.trim().is_empty() => return "",
      _ => return trimmed,
    }
  }
}
