//! Lookup settings loaded from `hwconfig.toml`.
//!
//! The file is optional. When it is missing the defaults below apply, which
//! match the usual `hosts/<name>/` layout of a flake-based NixOS repository.
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::error::SettingsError;

/// Settings file name, looked up at the repository root.
pub const SETTINGS_FILE: &str = "hwconfig.toml";

/// Placeholder replaced by the host name in candidate templates.
pub const HOST_PLACEHOLDER: &str = "{host}";

/// Where hardware configurations live inside a repository.
///
/// ```toml
/// hosts_dir = "machines"
/// candidates = ["machines/{host}/hardware.nix"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Path templates relative to the root, tried in order.
    pub candidates: Vec<String>,
    /// Directory whose sub-directories are the known hosts.
    pub hosts_dir: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            candidates: vec![
                "hosts/{host}/nixos/hardware-configuration.nix".to_string(),
                "hosts/{host}/hardware-configuration.nix".to_string(),
                "hosts/{host}/hardware.nix".to_string(),
            ],
            hosts_dir: "hosts".to_string(),
        }
    }
}

impl Settings {
    /// Load `hwconfig.toml` from `root`, falling back to defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(root: &Path) -> Result<Self, SettingsError> {
        Self::load_from(&root.join(SETTINGS_FILE))
    }

    /// Load settings from an explicit path, falling back to defaults when it
    /// does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let settings = toml::from_str(&content).map_err(|e| SettingsError::InvalidSyntax {
            file: path.display().to_string(),
            message: e.message().to_string(),
        })?;
        tracing::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Expand every candidate template for `host`, in priority order.
    ///
    /// # Examples
    ///
    /// ```
    /// use nixos_hwconfig::settings::Settings;
    ///
    /// let paths = Settings::default().candidate_paths("p620");
    /// assert_eq!(paths[0].to_str(), Some("hosts/p620/nixos/hardware-configuration.nix"));
    /// assert_eq!(paths.len(), 3);
    /// ```
    #[must_use]
    pub fn candidate_paths(&self, host: &str) -> Vec<PathBuf> {
        self.candidates
            .iter()
            .map(|template| PathBuf::from(template.replace(HOST_PLACEHOLDER, host)))
            .collect()
    }
}
