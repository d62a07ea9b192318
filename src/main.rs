mod commands;
mod core;
mod lint;
mod plugins;
mod release;
mod utils;

use clap::{ArgGroup, Parser, Subcommand};
use core::error::{RailError, print_error};
use std::path::PathBuf;

/// Commit-scope linting and per-plugin releases for plugin monorepos
#[derive(Parser)]
#[command(name = "plugin-rail")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
#[command(styles = get_styles())]
struct RailCli {
  /// Show debug diagnostics on stderr
  #[arg(short, long, global = true, conflicts_with = "quiet")]
  verbose: bool,

  /// Only show errors on stderr
  #[arg(short, long, global = true)]
  quiet: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  // ============================================================================
  // Setup
  // ============================================================================
  /// Write a default plugin-rail.toml
  Init {
    /// Also install a commit-msg hook that runs `plugin-rail lint --edit`
    #[arg(long)]
    hook: bool,
    /// Overwrite an existing configuration
    #[arg(long)]
    force: bool,
  },

  // ============================================================================
  // Commit policy
  // ============================================================================
  /// List valid commit scopes (one per plugin directory)
  Scopes {
    /// Output scopes as a JSON array
    #[arg(long)]
    json: bool,
  },

  /// Validate commit messages
  #[command(group(ArgGroup::new("source").required(true).args(["message", "edit", "from"])))]
  Lint {
    /// Lint a literal message
    #[arg(short, long)]
    message: Option<String>,
    /// Lint a commit message file (as passed to the commit-msg hook)
    #[arg(short, long)]
    edit: Option<PathBuf>,
    /// Lint every commit after this revision
    #[arg(long)]
    from: Option<String>,
    /// Last commit of the range (default: HEAD)
    #[arg(long, requires = "from")]
    to: Option<String>,
    /// Output results in JSON format
    #[arg(long)]
    json: bool,
  },

  // ============================================================================
  // Releases
  // ============================================================================
  /// Show which plugins changed between two revisions
  Changed {
    /// Previous revision (all-zero or empty: parent of --to)
    #[arg(long, env = "CI_PREV_COMMIT_SHA")]
    from: Option<String>,
    /// Current revision (default: HEAD)
    #[arg(long, env = "CI_COMMIT_SHA")]
    to: Option<String>,
    /// Output format: text (default), json, names-only
    #[arg(long, default_value = "text")]
    format: String,
  },

  /// Release every plugin changed between two revisions
  Release {
    /// Previous revision (all-zero or empty: parent of --to)
    #[arg(long, env = "CI_PREV_COMMIT_SHA")]
    from: Option<String>,
    /// Current revision (default: HEAD)
    #[arg(long, env = "CI_COMMIT_SHA")]
    to: Option<String>,
    /// Show what would run without writing files or running the release command
    #[arg(long)]
    dry_run: bool,
    /// Output a JSON summary (release command output goes to stderr)
    #[arg(long)]
    json: bool,
  },

  /// Print the release engine configuration rendered for a plugin
  ReleaseConfig {
    /// Plugin name (directory under the plugins directory)
    plugin: String,
  },
}

fn get_styles() -> clap::builder::Styles {
  clap::builder::Styles::styled()
    .usage(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .header(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Yellow))),
    )
    .literal(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))))
    .invalid(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .error(
      anstyle::Style::new()
        .bold()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Red))),
    )
    .valid(
      anstyle::Style::new()
        .bold()
        .underline()
        .fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::Green))),
    )
    .placeholder(anstyle::Style::new().fg_color(Some(anstyle::Color::Ansi(anstyle::AnsiColor::White))))
}

fn init_tracing(verbose: bool, quiet: bool) {
  let log_level = if verbose {
    "debug"
  } else if quiet {
    "error"
  } else {
    "warn"
  };

  tracing_subscriber::fmt()
    .with_env_filter(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
    )
    .with_writer(std::io::stderr)
    .with_target(false)
    .init();
}

fn main() {
  let cli = RailCli::parse();
  init_tracing(cli.verbose, cli.quiet);

  let workspace_root = match std::env::current_dir() {
    Ok(dir) => dir,
    Err(e) => {
      eprintln!("Error: Failed to get current directory: {}", e);
      std::process::exit(1);
    }
  };

  let ctx = match core::context::WorkspaceContext::build(&workspace_root) {
    Ok(ctx) => ctx,
    // `init --force` replaces a broken config, so it must not need a valid one
    Err(e) if matches!(cli.command, Commands::Init { force: true, .. }) => {
      tracing::warn!("ignoring unreadable config: {}", e);
      core::context::WorkspaceContext {
        root: workspace_root,
        config: Default::default(),
      }
    }
    Err(e) => handle_error(e),
  };

  let result = match cli.command {
    Commands::Init { hook, force } => commands::run_init(&ctx, hook, force),
    Commands::Scopes { json } => commands::run_scopes(&ctx, json),
    Commands::Lint {
      message,
      edit,
      from,
      to,
      json,
    } => {
      let source = match (message, edit, from) {
        (Some(message), _, _) => lint::LintSource::Message(message),
        (_, Some(path), _) => lint::LintSource::Edit(path),
        (_, _, Some(from)) => lint::LintSource::Range {
          from,
          to: to.unwrap_or_else(|| "HEAD".to_string()),
        },
        _ => handle_error(RailError::message("Provide --message, --edit or --from")),
      };
      commands::run_lint(&ctx, source, json)
    }
    Commands::Changed { from, to, format } => commands::run_changed(&ctx, from, to, format),
    Commands::Release {
      from,
      to,
      dry_run,
      json,
    } => commands::run_release(&ctx, from, to, dry_run, json),
    Commands::ReleaseConfig { plugin } => commands::run_release_config(&ctx, plugin),
  };

  if let Err(err) = result {
    handle_error(err);
  }
}

fn handle_error(err: RailError) -> ! {
  print_error(&err);
  std::process::exit(err.exit_code().as_i32());
}
