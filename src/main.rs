use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use project_context::cli::{AuthCommands, Cli, Commands, DriveCommands, ProfileCommands};
use project_context::profile::ProfileManager;
use project_context::resolve;

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    let root = resolve::app_root_dir();
    tracing::debug!("config root: {}", root.display());
    let mut manager = ProfileManager::new(root)?;

    if let Some(ref name) = cli.use_profile {
        manager.set_temporary_profile(name)?;
        eprintln!("Using temporary profile: {}", name);
    }

    match cli.command {
        Commands::Auth(cmd) => match cmd {
            AuthCommands::Login { force } => project_context::auth::login::run(&manager, force),
            AuthCommands::Status => project_context::auth::status::run(&manager),
            AuthCommands::Logout => project_context::auth::logout::run(&manager),
        },
        Commands::Profile(cmd) => match cmd {
            ProfileCommands::List => project_context::profile::list::run(&manager),
            ProfileCommands::Add { name } => project_context::profile::add::run(&manager, &name),
            ProfileCommands::Use { name } => project_context::profile::switch::run(&manager, &name),
            ProfileCommands::Info => project_context::profile::info::run(&manager),
            ProfileCommands::SetSecrets { file } => {
                project_context::profile::set_secrets::run(&manager, &file)
            }
        },
        Commands::Drive(cmd) => match cmd {
            DriveCommands::Ls { folder_id, name } => {
                project_context::drive::list::run(&manager, folder_id.as_deref(), name.as_deref())
            }
        },
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
