use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "project-context",
    version,
    about = "Authorize Google Drive access and manage per-account profiles"
)]
pub struct Cli {
    /// Use a profile for this run only, without changing the active one
    #[arg(long = "use", value_name = "PROFILE", global = true)]
    pub use_profile: Option<String>,

    /// More log output (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Authorization commands
    #[command(subcommand)]
    Auth(AuthCommands),

    /// Profile (multi-account) management
    #[command(subcommand)]
    Profile(ProfileCommands),

    /// Google Drive commands
    #[command(subcommand)]
    Drive(DriveCommands),
}

#[derive(Subcommand)]
pub enum AuthCommands {
    /// Authorize the active profile, reusing or refreshing a stored token
    Login {
        /// Discard the stored token and authorize again
        #[arg(long)]
        force: bool,
    },

    /// Show the stored token state (no network access)
    Status,

    /// Delete the active profile's stored token
    Logout,
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// List profiles
    List,

    /// Create a profile and make it active
    Add {
        /// Profile name
        name: String,
    },

    /// Switch the active profile
    Use {
        /// Profile name
        name: String,
    },

    /// Show the active profile's paths and session state
    Info,

    /// Install a client_secrets.json for the active profile only
    SetSecrets {
        /// Path to the client_secrets.json file
        file: PathBuf,
    },
}

#[derive(Subcommand)]
pub enum DriveCommands {
    /// List files in a Drive folder (default: My Drive root)
    Ls {
        /// Folder ID
        folder_id: Option<String>,

        /// Look the folder up by name under My Drive instead
        #[arg(long)]
        name: Option<String>,
    },
}
