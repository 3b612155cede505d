use anyhow::Result;

use crate::profile::ProfileManager;

/// project-context auth logout
pub fn run(manager: &ProfileManager) -> Result<()> {
    let token_path = manager.token_file()?;
    if !token_path.exists() {
        println!("No stored token for profile '{}'.", manager.active_profile_name());
        return Ok(());
    }
    std::fs::remove_file(&token_path)?;
    println!("Removed {}", token_path.display());
    Ok(())
}
