//! `plugin-rail init` - Write a default config and optionally install the commit-msg hook

use crate::core::config::{CONFIG_FILE, RailConfig};
use crate::core::context::WorkspaceContext;
use crate::core::error::{ConfigError, RailError, RailResult, ResultExt};
use crate::core::vcs::SystemGit;
use crate::plugins::list_plugins;
use std::fs;
use std::path::{Path, PathBuf};

/// Body of the commit-msg hook; git passes the message file as `$1`
const COMMIT_MSG_HOOK: &str = "#!/bin/sh\nexec plugin-rail lint --edit \"$1\"\n";

/// Run the init command
pub fn run_init(ctx: &WorkspaceContext, hook: bool, force: bool) -> RailResult<()> {
  let root = ctx.workspace_root();

  if let Some(existing) = RailConfig::find_config_path(root)
    && !force
  {
    return Err(RailError::Config(ConfigError::AlreadyExists { path: existing }));
  }

  println!("🔍 Initializing plugin-rail in {}", root.display());

  // Keep any values already loaded (force re-init preserves edits made to a valid config)
  let config_path = ctx.config.save(root)?;
  println!("   Wrote {}", config_path.display());

  let plugins = list_plugins(&ctx.plugins_dir())?;
  if plugins.is_empty() {
    println!(
      "   ⚠️  No plugins yet under {}/",
      ctx.config.workspace.plugins_dir.display()
    );
  } else {
    println!("   Found {} plugin(s): {}", plugins.len(), plugins.join(", "));
  }

  if hook {
    let hook_path = install_commit_msg_hook(root)?;
    println!("   Installed commit-msg hook: {}", hook_path.display());
  }

  println!("\n✅ Successfully initialized {}", CONFIG_FILE);
  println!("\n🚀 Next steps:");
  println!("   1. Review {} (plugins_dir, release.command)", CONFIG_FILE);
  if !hook {
    println!("   2. Run `plugin-rail init --hook --force` to lint commits locally");
  }
  println!("   In CI: `plugin-rail lint --from <base> --to HEAD` and `plugin-rail release`");

  Ok(())
}

/// Write the commit-msg hook
///
/// A `.husky/` directory takes precedence over the git hooks directory so the
/// hook survives `husky install`.
pub fn install_commit_msg_hook(root: &Path) -> RailResult<PathBuf> {
  let hooks_dir = if root.join(".husky").is_dir() {
    root.join(".husky")
  } else {
    SystemGit::open(root)?.hooks_dir()?
  };

  fs::create_dir_all(&hooks_dir).with_context(|| format!("Failed to create {}", hooks_dir.display()))?;

  let hook_path = hooks_dir.join("commit-msg");
  fs::write(&hook_path, COMMIT_MSG_HOOK).with_context(|| format!("Failed to write {}", hook_path.display()))?;

  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(&hook_path, fs::Permissions::from_mode(0o755))?;
  }

  tracing::info!(path = %hook_path.display(), "installed commit-msg hook");
  Ok(hook_path)
}
