//! Profiles: one working directory (and token) per Google account.

pub mod add;
pub mod info;
pub mod list;
pub mod set_secrets;
pub mod switch;

use anyhow::{Result, bail};
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::app_config::{self, AppConfig, DEFAULT_PROFILE};
use crate::resolve;
use crate::util;

/// Where the client secret for the active profile comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretsSource {
    Profile,
    Global,
}

impl fmt::Display for SecretsSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SecretsSource::Profile => write!(f, "profile (specific)"),
            SecretsSource::Global => write!(f, "global (shared)"),
        }
    }
}

pub struct ProfileManager {
    root_dir: PathBuf,
    profiles_dir: PathBuf,
    temp_profile: Option<String>,
}

impl ProfileManager {
    /// Open the profile store under `root`, creating it and migrating a
    /// pre-profiles layout into `default` if one is found.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root_dir = root.into();
        let profiles_dir = resolve::profiles_dir(&root_dir);
        std::fs::create_dir_all(&profiles_dir)?;
        let manager = Self {
            root_dir,
            profiles_dir,
            temp_profile: None,
        };
        manager.migrate_legacy_layout()?;
        Ok(manager)
    }

    pub fn profiles_dir(&self) -> &Path {
        &self.profiles_dir
    }

    /// Move a root-level token.json and `<dev>-<inode>` project dirs into
    /// `profiles/default`, unless that profile already exists.
    fn migrate_legacy_layout(&self) -> Result<()> {
        let default_dir = self.profiles_dir.join(DEFAULT_PROFILE);
        if default_dir.exists() {
            return Ok(());
        }

        let old_token = self.root_dir.join(resolve::TOKEN_FILE);
        let mut old_items = vec![];
        for entry in std::fs::read_dir(&self.root_dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if entry.file_type()?.is_dir() && util::is_legacy_context_dir(&name) {
                old_items.push(entry.path());
            }
        }

        if !old_token.exists() && old_items.is_empty() {
            return Ok(());
        }

        println!("Old layout detected. Migrating to profile '{}'...", DEFAULT_PROFILE);
        std::fs::create_dir_all(&default_dir)?;
        if old_token.exists() {
            std::fs::rename(&old_token, default_dir.join(resolve::TOKEN_FILE))?;
            info!("moved {} into profile '{}'", old_token.display(), DEFAULT_PROFILE);
        }
        for item in old_items {
            if let Some(name) = item.file_name() {
                std::fs::rename(&item, default_dir.join(name))?;
                info!("moved {} into profile '{}'", item.display(), DEFAULT_PROFILE);
            }
        }
        self.set_active_profile(DEFAULT_PROFILE)
    }

    /// Load config.toml, falling back to defaults when it cannot be read.
    pub fn config(&self) -> AppConfig {
        match app_config::load(&self.root_dir) {
            Ok(config) => config,
            Err(e) => {
                warn!("ignoring unreadable config: {:#}", e);
                AppConfig::default()
            }
        }
    }

    /// Use `name` for this process only, without touching config.toml.
    pub fn set_temporary_profile(&mut self, name: &str) -> Result<()> {
        if !self.profile_exists(name) {
            bail!(
                "Profile '{}' does not exist.\nAvailable profiles: {}",
                name,
                self.list_profiles()?.join(", ")
            );
        }
        debug!("using temporary profile '{}'", name);
        self.temp_profile = Some(name.to_string());
        Ok(())
    }

    pub fn active_profile_name(&self) -> String {
        if let Some(ref name) = self.temp_profile {
            return name.clone();
        }
        self.config().current_profile
    }

    /// Persist `name` as the active profile and create its directory.
    pub fn set_active_profile(&self, name: &str) -> Result<()> {
        if !util::is_valid_profile_name(name) {
            bail!(
                "Invalid profile name '{}'. Use letters, digits, '_', '-' or '.'.",
                name
            );
        }
        app_config::set_current_profile(&self.root_dir, name)?;
        std::fs::create_dir_all(self.profiles_dir.join(name))?;
        Ok(())
    }

    pub fn profile_exists(&self, name: &str) -> bool {
        util::is_valid_profile_name(name) && self.profiles_dir.join(name).is_dir()
    }

    /// Directory holding the active profile's data, created on demand.
    pub fn working_dir(&self) -> Result<PathBuf> {
        let name = self.active_profile_name();
        if !util::is_valid_profile_name(&name) {
            bail!("Invalid active profile name '{}' in config.toml", name);
        }
        let path = self.profiles_dir.join(&name);
        std::fs::create_dir_all(&path)?;
        Ok(path)
    }

    pub fn token_file(&self) -> Result<PathBuf> {
        Ok(self.working_dir()?.join(resolve::TOKEN_FILE))
    }

    /// Sorted profile names.
    pub fn list_profiles(&self) -> Result<Vec<String>> {
        let mut names = vec![];
        for entry in std::fs::read_dir(&self.profiles_dir)? {
            let entry = entry?;
            if entry.file_type()?.is_dir() {
                names.push(entry.file_name().to_string_lossy().to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Profile-specific client_secrets.json if present, else the global one.
    ///
    /// The global path is returned even when it does not exist, so callers
    /// can name it in error messages.
    pub fn resolve_secrets_file(&self) -> Result<(PathBuf, SecretsSource)> {
        let specific = self.working_dir()?.join(resolve::CLIENT_SECRETS_FILE);
        if specific.exists() {
            return Ok((specific, SecretsSource::Profile));
        }
        Ok((
            resolve::global_secrets_file(&self.root_dir),
            SecretsSource::Global,
        ))
    }

    /// Copy a client secret into the active profile.
    ///
    /// The profile's token was issued to the previous client, so it is
    /// deleted. Returns whether a token was removed.
    pub fn install_secrets(&self, source: &Path) -> Result<bool> {
        if !source.is_file() {
            bail!("Client secret file not found: {}", source.display());
        }
        let dir = self.working_dir()?;
        std::fs::copy(source, dir.join(resolve::CLIENT_SECRETS_FILE))?;

        let token = dir.join(resolve::TOKEN_FILE);
        if token.exists() {
            std::fs::remove_file(&token)?;
            info!("removed {} after installing new client secret", token.display());
            return Ok(true);
        }
        Ok(false)
    }
}
