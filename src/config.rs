//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/colourtree/colourtree.toml`
//! 3. Local config: file passed with `--config`
//! 4. Environment variables: `COLOURTREE_*` prefix (`__` separates nesting)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::{ApplicationError, IoResultExt, RunSettings};
use crate::domain::RenderOptions;

/// How trees are printed by `show` and the CLI.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RenderConfig {
    /// Print each node's propagated colour next to its own colour
    pub show_propagated: bool,
    /// Print arena handles next to node names
    pub show_ids: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            show_propagated: true,
            show_ids: false,
        }
    }
}

/// Raw render config for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRenderConfig {
    pub show_propagated: Option<bool>,
    pub show_ids: Option<bool>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub verify_each: Option<bool>,
    #[serde(default)]
    pub render: RawRenderConfig,
}

/// Unified configuration for colourtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct Settings {
    /// Re-check tree invariants after every mutating script statement
    pub verify_each: bool,
    /// Tree rendering
    pub render: RenderConfig,
}

/// Get the XDG config directory for colourtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "colourtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("colourtree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).with_path_context("read config", path)?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            verify_each: overlay.verify_each.unwrap_or(self.verify_each),
            render: RenderConfig {
                show_propagated: overlay
                    .render
                    .show_propagated
                    .unwrap_or(self.render.show_propagated),
                show_ids: overlay.render.show_ids.unwrap_or(self.render.show_ids),
            },
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local` - Optional config file given on the command line; it must exist
    pub fn load(local: Option<&Path>) -> Result<Self, ApplicationError> {
        let global = global_config_path().filter(|p| p.exists());
        Self::load_from(global.as_deref(), local)
    }

    /// Layered load with an explicit global path, used directly by tests.
    pub fn load_from(global: Option<&Path>, local: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(path) = global {
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 3. Local config named on the command line
        if let Some(path) = local {
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables (explicit override)
        Self::apply_env_overrides(current)
    }

    /// Apply COLOURTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("COLOURTREE")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_bool("verify_each") {
            settings.verify_each = val;
        }
        if let Ok(val) = config.get_bool("render.show_propagated") {
            settings.render.show_propagated = val;
        }
        if let Ok(val) = config.get_bool("render.show_ids") {
            settings.render.show_ids = val;
        }
        Ok(settings)
    }

    /// Serialize to TOML for `config show`.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: e.to_string(),
        })
    }

    pub fn run_settings(&self) -> RunSettings {
        RunSettings {
            verify_each: self.verify_each,
            render: self.render.into(),
        }
    }
}

impl From<RenderConfig> for RenderOptions {
    fn from(render: RenderConfig) -> Self {
        RenderOptions {
            show_propagated: render.show_propagated,
            show_ids: render.show_ids,
        }
    }
}
