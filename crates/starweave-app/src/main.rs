//! Starweave: headless spiral galaxy of user-dedicated stars.
//!
//! Run with: `cargo run -p starweave-app -- run --frames 600`

mod commands;
mod frame_clock;
mod platform;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use starweave_config::{CliArgs, Config};
use tracing::{error, info};

use commands::{AppError, CreateArgs, ListArgs, RunArgs};
use platform::PlatformDirs;

/// CLI arguments for the starweave binary.
#[derive(Parser, Debug)]
#[command(name = "starweave", about = "Procedural galaxy of user-dedicated stars")]
struct Cli {
    #[command(flatten)]
    global: CliArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build the galaxy from the store and simulate frames headlessly.
    Run(RunArgs),
    /// Create a star for a user.
    Create(CreateArgs),
    /// List a user's stars, newest first.
    List(ListArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let dirs = match PlatformDirs::resolve(cli.global.config.as_deref()) {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!("Failed to resolve directories: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Load or create config, then apply CLI overrides
    let mut config = Config::load_or_create(&dirs.config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&cli.global);

    starweave_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));
    info!("Starweave v{}", env!("CARGO_PKG_VERSION"));

    match execute(&cli.command, &config, &dirs) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn execute(command: &Command, config: &Config, dirs: &PlatformDirs) -> Result<(), AppError> {
    let store_path = dirs.store_path(config.catalog.store_path.as_deref());
    match command {
        Command::Run(args) => {
            commands::run(config, &store_path, args)?;
        }
        Command::Create(args) => {
            dirs.create_all()?;
            let record = commands::create(config, &store_path, args)?;
            println!("{}", commands::format_star(&record));
        }
        Command::List(args) => {
            for record in commands::list(&store_path, args)? {
                println!("{}", commands::format_star(&record));
            }
        }
    }
    Ok(())
}
