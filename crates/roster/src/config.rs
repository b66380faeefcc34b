//! Configuration management for Roster
//!
//! Handles loading and saving the user's defaults: which customer file to
//! read, how to print results, and which filters apply when none are given.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::display::OutputFormat;
use crate::error::Result;
use crate::filter::StatusFilter;

/// Config files looked up in the working directory, in order
const LOCAL_CONFIG_PATHS: [&str; 2] = [".roster.json", "roster.json"];

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RosterConfig {
  /// Customer file (JSON or YAML); the sample data is used when unset
  pub data_path: Option<PathBuf>,
  /// Output format for list, stats and show
  pub default_format: OutputFormat,
  /// Status dropdown value applied when `--status` is not given
  pub default_status: StatusFilter,
  /// Tab applied when `--tab` is not given
  pub default_tab: StatusFilter,
  /// Colored output
  pub color: bool,
}

impl Default for RosterConfig {
  fn default() -> Self {
    Self {
      data_path: None,
      default_format: OutputFormat::Pretty,
      default_status: StatusFilter::All,
      default_tab: StatusFilter::All,
      color: true,
    }
  }
}

impl RosterConfig {
  /// Load configuration from a file
  ///
  /// A relative `data_path` is taken relative to the config file's directory.
  pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let mut config: RosterConfig = serde_json::from_str(&content)?;

    config.data_path = config.data_path.map(|data_path| match path.parent() {
      Some(dir) if data_path.is_relative() => dir.join(data_path),
      _ => data_path,
    });

    bentley::debug!("Loaded configuration from {}", path.display());
    Ok(config)
  }

  /// Load the explicit config file if given, otherwise the first config
  /// found in the working directory or the user config directory, otherwise
  /// defaults
  pub fn load(explicit: Option<&Path>) -> Result<Self> {
    if let Some(path) = explicit {
      return Self::load_from_file(path);
    }

    for path in LOCAL_CONFIG_PATHS {
      if Path::new(path).exists() {
        return Self::load_from_file(path);
      }
    }

    if let Some(path) = user_config_path() {
      if path.exists() {
        return Self::load_from_file(path);
      }
    }

    Ok(RosterConfig::default())
  }

  /// Save configuration to a file
  pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
    let content = serde_json::to_string_pretty(self)?;
    std::fs::write(path, content)?;
    Ok(())
  }

  /// The customer file to read: an explicit override wins over the config
  pub fn resolve_data_path(&self, override_path: Option<&Path>) -> Option<PathBuf> {
    override_path.map(Path::to_path_buf).or_else(|| self.data_path.clone())
  }
}

/// `<config dir>/roster/config.json`, e.g. `~/.config/roster/config.json`
pub fn user_config_path() -> Option<PathBuf> {
  dirs::config_dir().map(|dir| dir.join("roster").join("config.json"))
}
