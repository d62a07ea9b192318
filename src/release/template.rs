//! Per-plugin release engine configuration
//!
//! Each plugin releases on its own tag line (`<plugin>-v1.2.3`), only counts
//! commits scoped to it, keeps its own changelog, and ships a Docker image
//! named after it. `${...}` placeholders are left for the release engine.

use crate::core::config::ReleaseConfig;
use crate::core::error::{RailResult, ResultExt};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

/// Renders the semantic-release configuration for a single plugin
pub struct ReleaseTemplate<'a> {
  config: &'a ReleaseConfig,
}

impl<'a> ReleaseTemplate<'a> {
  pub fn new(config: &'a ReleaseConfig) -> Self {
    Self { config }
  }

  /// Git tag format for `plugin`, e.g. `ansible-v${version}`
  pub fn tag_format(&self, plugin: &str) -> String {
    self.config.tag_format.replace("{plugin}", plugin)
  }

  /// Docker image reference built for each release
  pub fn image(&self, plugin: &str) -> String {
    format!(
      "${{process.env.{}}}/{}:${{nextRelease.version}}",
      self.config.registry_env, plugin
    )
  }

  /// Render the full release configuration
  pub fn render(&self, plugin: &str) -> Value {
    let mut plugins = vec![
      json!([
        "@semantic-release/commit-analyzer",
        {
          "preset": "angular",
          "releaseRules": [
            { "scope": plugin, "release": "patch" },
            { "scope": plugin, "type": "feat", "release": "minor" }
          ]
        }
      ]),
      json!("@semantic-release/release-notes-generator"),
      json!(["@semantic-release/changelog", { "changelogFile": self.config.changelog }]),
    ];

    plugins.push(self.exec_step(plugin));

    plugins.push(json!([
      "@semantic-release/git",
      {
        "assets": [self.config.changelog, self.config.manifest],
        "message": format!("chore({}): release ${{nextRelease.version}} [skip ci]", plugin)
      }
    ]));

    json!({
      "extends": self.config.extends,
      "tagFormat": self.tag_format(plugin),
      "plugins": plugins
    })
  }

  /// Version bump (and image build/push when enabled)
  fn exec_step(&self, plugin: &str) -> Value {
    let set_version = "npm pkg set version=${nextRelease.version}";

    if self.config.docker {
      let image = self.image(plugin);
      json!([
        "@semantic-release/exec",
        {
          "prepareCmd": format!("{} && docker build -t {} .", set_version, image),
          "publishCmd": format!("docker push {}", image)
        }
      ])
    } else {
      json!(["@semantic-release/exec", { "prepareCmd": set_version }])
    }
  }

  /// Render and write the configuration to `<dir>/<plugin>.json`
  pub fn write(&self, dir: &Path, plugin: &str) -> RailResult<PathBuf> {
    std::fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;

    let path = dir.join(format!("{}.json", plugin));
    let content = serde_json::to_string_pretty(&self.render(plugin))?;
    std::fs::write(&path, content).with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(path)
  }
}
