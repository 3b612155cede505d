//! Path resolution for project-context config directories.
//!
//! Resolution order for the root directory:
//!   1. PROJECT_CONTEXT_HOME environment variable
//!   2. OS config dir + project_context (~/.config, ~/Library/Application
//!      Support, %APPDATA%)
//!   3. ~/.config/project_context
//!
//! Everything else lives below the root:
//!
//! ```text
//! <root>/config.toml
//! <root>/client_secrets.json          (global, shared by profiles)
//! <root>/profiles/<name>/token.json
//! <root>/profiles/<name>/client_secrets.json   (optional override)
//! ```

use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = "project_context";
pub const HOME_ENV: &str = "PROJECT_CONTEXT_HOME";

pub const CLIENT_SECRETS_FILE: &str = "client_secrets.json";
pub const TOKEN_FILE: &str = "token.json";
pub const CONFIG_FILE: &str = "config.toml";
pub const PROFILES_DIR: &str = "profiles";

/// Return the per-user root directory. Does not create it.
pub fn app_root_dir() -> PathBuf {
    if let Ok(env) = std::env::var(HOME_ENV) {
        if !env.is_empty() {
            return expand_tilde(&env);
        }
    }
    default_root_dir()
}

/// Root directory when no override is set.
pub fn default_root_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|base| base.config_dir().join(APP_DIR_NAME))
        .unwrap_or_else(|| home_dir().join(".config").join(APP_DIR_NAME))
}

// --- Derived helpers ---

pub fn config_file(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn profiles_dir(root: &Path) -> PathBuf {
    root.join(PROFILES_DIR)
}

pub fn global_secrets_file(root: &Path) -> PathBuf {
    root.join(CLIENT_SECRETS_FILE)
}

/// Get the user's home directory.
pub fn home_dir() -> PathBuf {
    if let Some(base) = directories::BaseDirs::new() {
        return base.home_dir().to_path_buf();
    }
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Expand ~ to home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        home_dir().join(rest)
    } else if path == "~" {
        home_dir()
    } else {
        PathBuf::from(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_paths() {
        let root = PathBuf::from("/tmp/pc-root");
        assert_eq!(config_file(&root), root.join("config.toml"));
        assert_eq!(profiles_dir(&root), root.join("profiles"));
        assert_eq!(global_secrets_file(&root), root.join("client_secrets.json"));
    }

    #[test]
    fn test_default_root_is_config_dir_without_subfolder() {
        let base = directories::BaseDirs::new().unwrap();
        let expected = base.config_dir().join("project_context");
        assert_eq!(default_root_dir(), expected);
        if std::env::var_os(HOME_ENV).is_none() {
            assert_eq!(app_root_dir(), expected);
        }
    }

    #[test]
    fn test_expand_tilde() {
        let home = home_dir();
        assert_eq!(expand_tilde("~/x"), home.join("x"));
        assert_eq!(expand_tilde("~"), home);
        assert_eq!(expand_tilde("/abs"), PathBuf::from("/abs"));
    }
}
