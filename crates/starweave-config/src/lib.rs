//! Configuration system for Starweave.
//!
//! Galaxy shape, object scaling, activation animations, camera flights and the
//! star catalog are all runtime-configurable and persist to disk as RON files.
//! Supports CLI overrides via clap, hot-reload detection, and forward/backward
//! compatible serialization.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    ActivationStyle, AnimationConfig, CameraConfig, CatalogConfig, Config, DebugConfig,
    GalaxyConfig, ScaleConfig,
};
pub use error::ConfigError;
