use anyhow::Result;

use super::bootstrap::Outcome;
use crate::profile::ProfileManager;

/// project-context auth login [--force]
pub fn run(manager: &ProfileManager, force: bool) -> Result<()> {
    let bootstrapper = super::bootstrapper_for(manager)?;
    let token_path = &bootstrapper.paths().token;

    if force && token_path.exists() {
        std::fs::remove_file(token_path)?;
        tracing::info!("removed {} before login", token_path.display());
    }

    let (_, outcome) = bootstrapper.run()?;
    let profile = manager.active_profile_name();
    match outcome {
        Outcome::Stored => println!("Profile '{}' is already authorized.", profile),
        Outcome::Refreshed => println!("Credentials for '{}' refreshed.", profile),
        Outcome::Authorized => println!(
            "Authorization complete. Credentials saved to {}",
            token_path.display()
        ),
    }
    Ok(())
}
