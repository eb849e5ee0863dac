//! Procedural spiral galaxy and per-frame animation core.
//!
//! Generates a background field of stars and haze with a Gaussian/spiral
//! placement model, owns user-submitted custom stars, and animates them
//! (distance scaling, blink/glow activation, eased camera fly-to). Rendering
//! is delegated to a [`SceneHost`].

pub mod activation;
pub mod body;
pub mod camera;
pub mod custom_star;
pub mod error;
pub mod galaxy;
pub mod placement;
pub mod record;
pub mod sampler;
pub mod scene;
pub mod spiral;
pub mod star_type;

pub use activation::{
    ActivatableAnimation, ActivationStrategy, ActiveAnimation, AnimationStep, BlinkAnimation,
    GlowAnimation, Pulse, RestState,
};
pub use body::{Appearance, BodyKind, CelestialBody, haze_opacity_at, star_size_at};
pub use camera::{
    CameraFlyTo, CameraRig, FlightController, FlightStatus, FlightToken, approach_position,
    ease_in_out_cubic,
};
pub use custom_star::CustomStar;
pub use error::GalaxyError;
pub use galaxy::{Galaxy, background_star_count};
pub use placement::{Placement, PositionGenerator, Region, RegionQuota};
pub use record::{StarId, StarRecord, UserId};
pub use sampler::{DEFAULT_TAIL_SIGMA, GaussianSampler, gaussian_random};
pub use scene::{HeadlessScene, RenderHandle, SceneHost, Sprite};
pub use spiral::SpiralProjector;
pub use star_type::{HAZE_COLOR_HEX, StarType, color_from_hex, color_to_hex};
