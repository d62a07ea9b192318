use crate::core::error::{ConfigError, RailError, RailResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name written by `plugin-rail init`
pub const CONFIG_FILE: &str = "plugin-rail.toml";

/// Configuration for plugin-rail
/// Searched in order: plugin-rail.toml, .plugin-rail.toml, .config/plugin-rail.toml
///
/// Every section is optional; a repository without a config file runs with defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RailConfig {
  #[serde(default)]
  pub workspace: WorkspaceConfig,
  #[serde(default)]
  pub lint: LintConfig,
  #[serde(default)]
  pub release: ReleaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
  /// Directory holding one subdirectory per plugin (relative to the repo root)
  #[serde(default = "default_plugins_dir")]
  pub plugins_dir: PathBuf,
}

fn default_plugins_dir() -> PathBuf {
  PathBuf::from("plugins")
}

impl Default for WorkspaceConfig {
  fn default() -> Self {
    Self {
      plugins_dir: default_plugins_dir(),
    }
  }
}

/// Commit message lint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LintConfig {
  /// Reject commits without a scope (`scope-empty`)
  #[serde(default)]
  pub require_scope: bool,

  /// Scopes accepted in addition to plugin names (e.g. "ci", "deps")
  #[serde(default)]
  pub extra_scopes: Vec<String>,

  /// Messages containing any of these substrings are not linted
  #[serde(default = "default_ignore_containing")]
  pub ignore_containing: Vec<String>,

  /// Maximum header length (`header-max-length`)
  #[serde(default = "default_max_length")]
  pub header_max_length: usize,

  /// Maximum body/footer line length
  #[serde(default = "default_max_length")]
  pub line_max_length: usize,
}

fn default_ignore_containing() -> Vec<String> {
  vec!["Initial plan".to_string()]
}

fn default_max_length() -> usize {
  100
}

impl Default for LintConfig {
  fn default() -> Self {
    Self {
      require_scope: false,
      extra_scopes: Vec::new(),
      ignore_containing: default_ignore_containing(),
      header_max_length: default_max_length(),
      line_max_length: default_max_length(),
    }
  }
}

/// Per-plugin release configuration
///
/// # Example
///
/// ```toml
/// [release]
/// command = ["npx", "semantic-release", "--extends", "{config}"]
/// tag_format = "{plugin}-v${version}"
/// registry_env = "DOCKER_REG_USERNAME"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseConfig {
  /// Release command argv. `{config}` expands to the rendered config path, `{plugin}` to the plugin name.
  #[serde(default = "default_command")]
  pub command: Vec<String>,

  /// Shareable config the rendered release config extends
  #[serde(default = "default_extends")]
  pub extends: String,

  /// Git tag format. `{plugin}` is substituted here; `${version}` is left for the release engine.
  #[serde(default = "default_tag_format")]
  pub tag_format: String,

  /// Manifest file created in each plugin directory when absent
  #[serde(default = "default_manifest")]
  pub manifest: String,

  /// Version written into a freshly created manifest
  #[serde(default = "default_initial_version")]
  pub initial_version: String,

  /// Per-plugin changelog file
  #[serde(default = "default_changelog")]
  pub changelog: String,

  /// Environment variable holding the Docker registry user/namespace
  #[serde(default = "default_registry_env")]
  pub registry_env: String,

  /// Build and push a Docker image per release
  #[serde(default = "default_true")]
  pub docker: bool,
}

fn default_command() -> Vec<String> {
  ["npx", "semantic-release", "--extends", "{config}"]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_extends() -> String {
  "semantic-release-monorepo".to_string()
}

fn default_tag_format() -> String {
  "{plugin}-v${version}".to_string()
}

fn default_manifest() -> String {
  "package.json".to_string()
}

fn default_initial_version() -> String {
  "0.0.0-dev".to_string()
}

fn default_changelog() -> String {
  "CHANGELOG.md".to_string()
}

fn default_registry_env() -> String {
  "DOCKER_REG_USERNAME".to_string()
}

fn default_true() -> bool {
  true
}

impl Default for ReleaseConfig {
  fn default() -> Self {
    Self {
      command: default_command(),
      extends: default_extends(),
      tag_format: default_tag_format(),
      manifest: default_manifest(),
      initial_version: default_initial_version(),
      changelog: default_changelog(),
      registry_env: default_registry_env(),
      docker: default_true(),
    }
  }
}

impl ReleaseConfig {
  /// Validate release configuration
  pub fn validate(&self) -> RailResult<()> {
    if self.command.first().is_none_or(|program| program.trim().is_empty()) {
      return Err(invalid("release.command", "must name a program to run"));
    }

    if semver::Version::parse(&self.initial_version).is_err() {
      return Err(invalid(
        "release.initial_version",
        &format!("'{}' is not valid semver (e.g. '0.0.0-dev')", self.initial_version),
      ));
    }

    if !self.tag_format.contains("${version}") {
      return Err(invalid("release.tag_format", "must contain ${version}"));
    }

    if self.manifest.contains('/') || self.manifest.contains('\\') {
      return Err(invalid("release.manifest", "must be a file name, not a path"));
    }

    Ok(())
  }
}

impl LintConfig {
  /// Validate lint configuration
  pub fn validate(&self) -> RailResult<()> {
    if self.header_max_length == 0 {
      return Err(invalid("lint.header_max_length", "must be greater than zero"));
    }
    if self.line_max_length == 0 {
      return Err(invalid("lint.line_max_length", "must be greater than zero"));
    }
    Ok(())
  }
}

fn invalid(field: &str, reason: &str) -> RailError {
  RailError::Config(ConfigError::InvalidValue {
    field: field.to_string(),
    reason: reason.to_string(),
  })
}

impl RailConfig {
  /// Find config file in search order: plugin-rail.toml, .plugin-rail.toml, .config/plugin-rail.toml
  pub fn find_config_path(path: &Path) -> Option<PathBuf> {
    let candidates = vec![
      path.join(CONFIG_FILE),
      path.join(".plugin-rail.toml"),
      path.join(".config").join(CONFIG_FILE),
    ];

    candidates.into_iter().find(|p| p.exists())
  }

  /// Load config, falling back to defaults when no file exists
  pub fn load_or_default(path: &Path) -> RailResult<Self> {
    match Self::find_config_path(path) {
      Some(config_path) => Self::load_from(&config_path),
      None => {
        tracing::debug!(root = %path.display(), "no plugin-rail config found, using defaults");
        Ok(Self::default())
      }
    }
  }

  /// Load and validate a specific config file
  pub fn load_from(config_path: &Path) -> RailResult<Self> {
    let content = fs::read_to_string(config_path)
      .with_context(|| format!("Failed to read config from {}", config_path.display()))?;
    let config: RailConfig = toml_edit::de::from_str(&content)
      .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

    config
      .lint
      .validate()
      .and_then(|_| config.release.validate())
      .with_context(|| format!("Invalid configuration in {}", config_path.display()))?;

    tracing::debug!(path = %config_path.display(), "loaded config");
    Ok(config)
  }

  /// Save config to plugin-rail.toml (default location)
  pub fn save(&self, path: &Path) -> RailResult<PathBuf> {
    let config_path = path.join(CONFIG_FILE);
    let content = toml_edit::ser::to_string_pretty(self).context("Failed to serialize config to TOML")?;
    fs::write(&config_path, content).with_context(|| format!("Failed to write config to {}", config_path.display()))?;
    Ok(config_path)
  }
}
