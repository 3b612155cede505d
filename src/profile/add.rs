use anyhow::Result;

use super::ProfileManager;

/// project-context profile add NAME
pub fn run(manager: &ProfileManager, name: &str) -> Result<()> {
    if manager.profile_exists(name) {
        println!("Profile '{}' already exists.", name);
        return Ok(());
    }
    manager.set_active_profile(name)?;
    println!("Profile '{}' created and activated.", name);
    println!("Run 'project-context auth login' to authorize it.");
    Ok(())
}
