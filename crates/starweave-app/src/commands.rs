//! Subcommand implementations.

use std::path::Path;

use clap::Args;
use glam::Vec3;
use starweave_catalog::{CatalogError, JsonFileStarStore, StarCatalog, StarDraft, StarStore};
use starweave_config::Config;
use starweave_galaxy::{
    BodyKind, CameraRig, FlightStatus, Galaxy, HeadlessScene, StarId, StarRecord, UserId,
};
use tracing::{debug, info, warn};

use crate::frame_clock::{FIXED_DT, FrameClock};
use crate::platform::PlatformError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Number of 60 Hz frames to simulate.
    #[arg(long, default_value_t = 600)]
    pub frames: u32,

    /// Fly the camera to this star id at the first frame.
    #[arg(long)]
    pub navigate: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct CreateArgs {
    /// Owning user id.
    #[arg(long)]
    pub user: String,
    #[arg(long)]
    pub name: String,
    #[arg(long)]
    pub surname: String,
    #[arg(long)]
    pub message: String,
    /// Public URL of an uploaded photo.
    #[arg(long)]
    pub photo: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct ListArgs {
    /// Owning user id.
    #[arg(long)]
    pub user: String,
}

/// What a headless run ended with.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub sprites: usize,
    pub custom_sprites: usize,
    pub animating: usize,
    pub camera: CameraRig,
    pub arrived: bool,
}

fn open_catalog(
    config: &Config,
    store_path: &Path,
) -> Result<StarCatalog<JsonFileStarStore>, AppError> {
    let store = JsonFileStarStore::open(store_path)?;
    Ok(StarCatalog::new(store, &config.catalog))
}

fn start_rig(config: &Config) -> CameraRig {
    CameraRig::new(
        Vec3::from_array(config.camera.start_position),
        Vec3::from_array(config.camera.start_target),
    )
}

/// Build the galaxy from the store and simulate `args.frames` frames.
pub fn run(config: &Config, store_path: &Path, args: &RunArgs) -> Result<RunSummary, AppError> {
    let catalog = open_catalog(config, store_path)?;
    let galaxy = catalog.load_galaxy(config)?;
    Ok(simulate(galaxy, config, args))
}

/// Drive an already seeded galaxy on a fixed 60 Hz clock.
pub fn simulate(mut galaxy: Galaxy, config: &Config, args: &RunArgs) -> RunSummary {
    let mut scene = HeadlessScene::new();
    let mut rig = start_rig(config);
    let mut clock = FrameClock::new();
    let trace = config.debug.trace_flights;

    if let Some(id) = &args.navigate {
        let id = StarId(id.clone());
        if galaxy.navigate_to_star(&id, &rig, clock.now()).is_none() {
            warn!(star = %id, "cannot navigate: star not found");
        }
    }

    let mut arrived = false;
    for _ in 0..args.frames {
        clock.tick(FIXED_DT, |now| {
            let status = galaxy.frame(&mut rig, &mut scene, now);
            if trace && status.is_some() {
                debug!(position = ?rig.position, target = ?rig.target, "camera");
            }
            if status == Some(FlightStatus::Arrived) {
                info!(position = ?rig.position, "camera arrived");
                arrived = true;
            }
        });
    }

    let summary = RunSummary {
        frames: clock.update_count(),
        sprites: scene.len(),
        custom_sprites: scene.count_kind(BodyKind::Custom),
        animating: galaxy.animating_count(),
        camera: rig,
        arrived,
    };
    info!(
        frames = clock.frame_count(),
        steps = summary.frames,
        sprites = summary.sprites,
        custom = summary.custom_sprites,
        animating = summary.animating,
        updates = scene.update_count(),
        arrived = summary.arrived,
        camera = ?summary.camera.position,
        "run finished"
    );
    summary
}

/// Create a star in the store.
pub fn create(config: &Config, store_path: &Path, args: &CreateArgs) -> Result<StarRecord, AppError> {
    let mut catalog = open_catalog(config, store_path)?;
    let mut galaxy = catalog.load_custom_stars(config)?;

    let mut draft = StarDraft::new(&args.name, &args.surname, &args.message);
    if let Some(photo) = &args.photo {
        draft = draft.with_photo(photo);
    }
    let user = UserId(args.user.clone());
    let record = catalog.create_star(&user, draft, &mut galaxy, std::time::Duration::ZERO)?;
    info!(
        star = %record.id,
        remaining = catalog.remaining_quota(&user)?,
        "star saved"
    );
    Ok(record)
}

/// A user's stars, newest first.
pub fn list(store_path: &Path, args: &ListArgs) -> Result<Vec<StarRecord>, AppError> {
    let store = JsonFileStarStore::open(store_path)?;
    Ok(store.list_user_stars(&UserId(args.user.clone()))?)
}

/// One line per star for terminal output.
pub fn format_star(record: &StarRecord) -> String {
    let position = record
        .position()
        .map(|p| format!("({:.1}, {:.1}, {:.1})", p.x, p.y, p.z))
        .unwrap_or_else(|_| "(no position)".to_string());
    format!(
        "{}  {}  {}  {}  \"{}\"",
        record.id,
        record.created_at.format("%Y-%m-%d %H:%M"),
        record.display_name(),
        position,
        record.message
    )
}
