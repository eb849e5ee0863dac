//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level Starweave configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Procedural galaxy shape and population.
    pub galaxy: GalaxyConfig,
    /// Distance-based sprite scaling.
    pub scale: ScaleConfig,
    /// Custom star activation animations.
    pub animation: AnimationConfig,
    /// Camera fly-to settings.
    pub camera: CameraConfig,
    /// Star catalog / backing store settings.
    pub catalog: CatalogConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Shape of the procedural galaxy.
///
/// All distances are in scene units. The `*_dist` values are standard
/// deviations of the Gaussian used for that region.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GalaxyConfig {
    /// Background star count used when the store holds no custom stars.
    pub default_star_count: u32,
    /// Lower bound on background stars when custom stars exist.
    pub min_background_stars: u32,
    /// Background stars generated per custom star in the store.
    pub stars_per_custom_star: u32,
    /// Number of spiral arms.
    pub arms: u32,
    /// Core spread along x.
    pub core_x_dist: f32,
    /// Core spread along y.
    pub core_y_dist: f32,
    /// Outer core spread along x.
    pub outer_core_x_dist: f32,
    /// Outer core spread along y.
    pub outer_core_y_dist: f32,
    /// Mean x offset of an arm sample before projection.
    pub arm_x_mean: f32,
    /// Mean y offset of an arm sample before projection.
    pub arm_y_mean: f32,
    /// Arm spread along x. Also the radius unit of the spiral winding.
    pub arm_x_dist: f32,
    /// Arm spread along y.
    pub arm_y_dist: f32,
    /// Disc thickness (z spread) for every region.
    pub thickness: f32,
    /// Spiral winding constant: radians of twist per `arm_x_dist` of radius.
    pub spiral: f32,
    /// Haze puffs generated per background star.
    pub haze_ratio: f32,
    /// Smallest haze puff base size.
    pub haze_min_size: f32,
    /// Largest haze puff base size.
    pub haze_max_size: f32,
    /// Standard-normal draws beyond this many sigmas are resampled.
    pub tail_sigma: f32,
    /// Fixed RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
}

/// Distance-based sprite scaling bounds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ScaleConfig {
    /// Distance at which a star is drawn at its base size.
    pub reference_distance: f32,
    /// Smallest star sprite size (visibility floor).
    pub star_min_size: f32,
    /// Largest star sprite size.
    pub star_max_size: f32,
    /// Lowest haze opacity (visibility floor).
    pub haze_min_opacity: f32,
    /// Highest haze opacity.
    pub haze_max_opacity: f32,
}

/// Which activation animation custom stars play.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
pub enum ActivationStyle {
    /// Opacity pulses until a cutoff, then snaps back to fully opaque.
    Blink,
    /// Brightness ramps up and back down, then the original color is restored.
    #[default]
    Glow,
}

/// Activation animation timing and intensity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AnimationConfig {
    /// Strategy used by `animate_new_star` and `navigate_to_star`.
    pub style: ActivationStyle,
    /// Blink cutoff in seconds.
    pub blink_duration_secs: f32,
    /// Blink oscillations per second.
    pub blink_frequency: f32,
    /// Blink opacity trough.
    pub blink_min_opacity: f32,
    /// Glow window in seconds.
    pub glow_duration_secs: f32,
    /// Peak brightness multiplier reached at the middle of the glow window.
    pub glow_peak: f32,
}

/// Camera settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    /// Fly-to duration in milliseconds.
    pub fly_duration_ms: u64,
    /// Distance the camera stops from a star it navigates to.
    pub approach_distance: f32,
    /// Initial camera position.
    pub start_position: [f32; 3],
    /// Initial orbit target.
    pub start_target: [f32; 3],
}

/// Star catalog settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CatalogConfig {
    /// How many stars a single user may own.
    pub max_stars_per_user: u32,
    /// JSON file backing the store. `None` keeps stars in memory.
    pub store_path: Option<PathBuf>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log a per-frame trace of camera flights.
    pub trace_flights: bool,
}

// --- Default implementations ---

impl Default for GalaxyConfig {
    fn default() -> Self {
        Self {
            default_star_count: 10_000,
            min_background_stars: 1_000,
            stars_per_custom_star: 100,
            arms: 2,
            core_x_dist: 33.0,
            core_y_dist: 33.0,
            outer_core_x_dist: 100.0,
            outer_core_y_dist: 100.0,
            arm_x_mean: 200.0,
            arm_y_mean: 100.0,
            arm_x_dist: 100.0,
            arm_y_dist: 50.0,
            thickness: 5.0,
            spiral: 3.0,
            haze_ratio: 0.5,
            haze_min_size: 1.0,
            haze_max_size: 10.0,
            tail_sigma: 6.0,
            seed: None,
        }
    }
}

impl Default for ScaleConfig {
    fn default() -> Self {
        Self {
            reference_distance: 250.0,
            star_min_size: 0.25,
            star_max_size: 5.0,
            haze_min_opacity: 0.02,
            haze_max_opacity: 0.2,
        }
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            style: ActivationStyle::default(),
            blink_duration_secs: 5.0,
            blink_frequency: 4.0,
            blink_min_opacity: 0.3,
            glow_duration_secs: 3.0,
            glow_peak: 3.0,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fly_duration_ms: 2000,
            approach_distance: 15.0,
            start_position: [0.0, 500.0, 500.0],
            start_target: [0.0, 0.0, 0.0],
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            max_stars_per_user: 5,
            store_path: None,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            trace_flights: false,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
