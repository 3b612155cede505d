use anyhow::Result;

use super::token::TokenState;
use crate::profile::ProfileManager;

/// project-context auth status
///
/// Reports the stored token without touching the network.
pub fn run(manager: &ProfileManager) -> Result<()> {
    let token_path = manager.token_file()?;
    let state = TokenState::of_file(&token_path);

    println!("Profile: {}", manager.active_profile_name());
    println!("Token:   {}", token_path.display());
    println!("Status:  {}", state);
    if let TokenState::Corrupted(ref reason) = state {
        println!("         {}", reason);
    }
    if state.needs_login() {
        println!("Run 'project-context auth login' to authorize.");
    }
    Ok(())
}
