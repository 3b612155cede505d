use anyhow::Result;

use super::ProfileManager;

/// project-context profile list
pub fn run(manager: &ProfileManager) -> Result<()> {
    let active = manager.active_profile_name();
    let profiles = manager.list_profiles()?;

    if profiles.is_empty() {
        println!("No profiles yet. Create one with 'project-context profile add NAME'.");
        return Ok(());
    }

    println!("Profiles:");
    for name in &profiles {
        let marker = if *name == active { "*" } else { " " };
        println!("  {} {}", marker, name);
    }
    Ok(())
}
