use anyhow::Result;

use super::ProfileManager;
use crate::auth::token::TokenState;

/// project-context profile info
pub fn run(manager: &ProfileManager) -> Result<()> {
    let name = manager.active_profile_name();
    let working_dir = manager.working_dir()?;
    let (secrets_path, source) = manager.resolve_secrets_file()?;
    let token_path = manager.token_file()?;

    println!("Profile:  {}", name);
    println!("Data:     {}", working_dir.display());
    println!("Secrets:  {}", source);
    let missing = if secrets_path.exists() { "" } else { " (missing)" };
    println!("          {}{}", secrets_path.display(), missing);

    let state = TokenState::of_file(&token_path);
    println!("Session:  {}", state);
    Ok(())
}
