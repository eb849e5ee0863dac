//! Command-line overrides for Starweave.

use std::path::PathBuf;

use clap::Args;

use crate::{ActivationStyle, Config};

/// Global Starweave command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Args, Debug, Clone, Default)]
pub struct CliArgs {
    /// Fixed RNG seed for galaxy generation.
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Background star count when the store is empty.
    #[arg(long, global = true)]
    pub stars: Option<u32>,

    /// Number of spiral arms.
    #[arg(long, global = true)]
    pub arms: Option<u32>,

    /// Activation animation style.
    #[arg(long, value_enum, global = true)]
    pub animation: Option<ActivationStyle>,

    /// JSON file backing the star store.
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(seed) = args.seed {
            self.galaxy.seed = Some(seed);
        }
        if let Some(stars) = args.stars {
            self.galaxy.default_star_count = stars;
        }
        if let Some(arms) = args.arms {
            self.galaxy.arms = arms;
        }
        if let Some(style) = args.animation {
            self.animation.style = style;
        }
        if let Some(ref path) = args.store {
            self.catalog.store_path = Some(path.clone());
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
