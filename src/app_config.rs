//! App-level config for project-context (active profile, OAuth settings).
//!
//! Reads/writes {root}/config.toml.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::resolve;

pub const DEFAULT_PROFILE: &str = "default";
pub const DRIVE_SCOPE: &str = "https://www.googleapis.com/auth/drive";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_profile")]
    pub current_profile: String,
    #[serde(default)]
    pub oauth: OAuthSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuthSettings {
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
    /// Loopback port for the redirect; 0 lets the OS pick one.
    #[serde(default)]
    pub port: u16,
    #[serde(default = "default_open_browser")]
    pub open_browser: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_profile() -> String {
    DEFAULT_PROFILE.to_string()
}
fn default_scopes() -> Vec<String> {
    vec![DRIVE_SCOPE.to_string()]
}
fn default_open_browser() -> bool {
    true
}
fn default_timeout_secs() -> u64 {
    300
}

impl Default for OAuthSettings {
    fn default() -> Self {
        Self {
            scopes: default_scopes(),
            port: 0,
            open_browser: true,
            timeout_secs: 300,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            current_profile: default_profile(),
            oauth: OAuthSettings::default(),
        }
    }
}

/// Read config.toml, returning defaults if missing.
pub fn load(root: &Path) -> Result<AppConfig> {
    let path = resolve::config_file(root);
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let content = std::fs::read_to_string(&path)?;
    let config: AppConfig = toml::from_str(&content)
        .map_err(|e| anyhow::anyhow!("Invalid config at {}: {}", path.display(), e))?;
    Ok(config)
}

/// Persist `current_profile`, creating config.toml if needed.
///
/// Uses toml_edit so comments and other keys in the file survive.
pub fn set_current_profile(root: &Path, name: &str) -> Result<()> {
    let path = resolve::config_file(root);
    let content = if path.exists() {
        std::fs::read_to_string(&path)?
    } else {
        String::new()
    };
    let mut doc = content.parse::<toml_edit::DocumentMut>()?;
    doc["current_profile"] = toml_edit::value(name);

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&path, doc.to_string())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_missing_returns_defaults() {
        let tmp = TempDir::new().unwrap();
        let config = load(tmp.path()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.oauth.scopes, vec![DRIVE_SCOPE.to_string()]);
    }

    #[test]
    fn test_load_partial_oauth_table() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("config.toml"),
            "current_profile = \"work\"\n\n[oauth]\nport = 8765\n",
        )
        .unwrap();
        let config = load(tmp.path()).unwrap();
        assert_eq!(config.current_profile, "work");
        assert_eq!(config.oauth.port, 8765);
        assert!(config.oauth.open_browser);
        assert_eq!(config.oauth.timeout_secs, 300);
    }

    #[test]
    fn test_set_current_profile_preserves_comments() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "# my settings\ncurrent_profile = \"default\"\n\n[oauth]\nopen_browser = false\n",
        )
        .unwrap();

        set_current_profile(tmp.path(), "work").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("# my settings"));
        let config = load(tmp.path()).unwrap();
        assert_eq!(config.current_profile, "work");
        assert!(!config.oauth.open_browser);
    }

    #[test]
    fn test_load_invalid_names_path() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("config.toml"), "current_profile = [").unwrap();
        let err = load(tmp.path()).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }
}
