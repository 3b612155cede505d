use anyhow::{Result, bail};

use super::ProfileManager;

/// project-context profile use NAME
pub fn run(manager: &ProfileManager, name: &str) -> Result<()> {
    if !manager.profile_exists(name) {
        bail!(
            "Profile '{}' does not exist.\nAvailable profiles: {}",
            name,
            manager.list_profiles()?.join(", ")
        );
    }
    manager.set_active_profile(name)?;
    println!("Active profile: {}", name);
    Ok(())
}
