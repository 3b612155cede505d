use anyhow::Result;
use std::path::Path;

use super::ProfileManager;

/// project-context profile set-secrets FILE
pub fn run(manager: &ProfileManager, source: &Path) -> Result<()> {
    let removed_token = manager.install_secrets(source)?;
    println!(
        "Installed client secret for profile '{}'.",
        manager.active_profile_name()
    );
    if removed_token {
        println!("Previous token removed. Run 'project-context auth login' to re-authorize.");
    }
    Ok(())
}
