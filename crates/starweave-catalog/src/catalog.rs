//! Star creation flow: quota, placement, persistence, activation.

use std::time::Duration;

use starweave_config::{CatalogConfig, Config};
use starweave_galaxy::{Galaxy, StarRecord, UserId};
use tracing::{info, warn};

use crate::draft::{NewStarRecord, StarDraft};
use crate::error::CatalogError;
use crate::store::StarStore;

/// Creates and lists user stars on top of a [`StarStore`].
pub struct StarCatalog<S: StarStore> {
    store: S,
    max_stars_per_user: u32,
}

impl<S: StarStore> StarCatalog<S> {
    pub fn new(store: S, config: &CatalogConfig) -> Self {
        Self {
            store,
            max_stars_per_user: config.max_stars_per_user,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn max_stars_per_user(&self) -> u32 {
        self.max_stars_per_user
    }

    /// Build a galaxy seeded with every stored star.
    pub fn load_galaxy(&self, config: &Config) -> Result<Galaxy, CatalogError> {
        let records = self.store.list_custom_stars()?;
        Ok(Galaxy::from_records(config, records))
    }

    /// A galaxy holding only the stored custom stars, with no background
    /// field. Enough for placing and creating new stars.
    pub fn load_custom_stars(&self, config: &Config) -> Result<Galaxy, CatalogError> {
        let mut galaxy = Galaxy::new(config);
        galaxy.add_records(self.store.list_custom_stars()?);
        Ok(galaxy)
    }

    /// A user's stars, newest first.
    pub fn user_stars(&self, user: &UserId) -> Result<Vec<StarRecord>, CatalogError> {
        self.store.list_user_stars(user)
    }

    /// How many more stars the user may create.
    pub fn remaining_quota(&self, user: &UserId) -> Result<u32, CatalogError> {
        let owned = self.store.list_user_stars(user)?.len();
        let owned = u32::try_from(owned).unwrap_or(u32::MAX);
        Ok(self.max_stars_per_user.saturating_sub(owned))
    }

    /// Create a star for `user`.
    ///
    /// The star is placed with the random-branch generator, given a weighted
    /// spectral type, persisted, added to `galaxy`, and activated at `now`.
    /// Once persisted the stored row stands: if `galaxy` rejects it, the
    /// record is still returned and the star is left out of this galaxy.
    pub fn create_star(
        &mut self,
        user: &UserId,
        draft: StarDraft,
        galaxy: &mut Galaxy,
        now: Duration,
    ) -> Result<StarRecord, CatalogError> {
        let draft = draft.validate()?;
        if self.remaining_quota(user)? == 0 {
            return Err(CatalogError::QuotaExceeded {
                user: user.clone(),
                limit: self.max_stars_per_user,
            });
        }

        let position = galaxy.random_position();
        let star_type = galaxy.random_star_type();
        let record = self.store.create_custom_star(NewStarRecord {
            user_id: user.clone(),
            name: draft.name,
            surname: draft.surname,
            message: draft.message,
            photo_url: draft.photo_url,
            position_x: position.x,
            position_y: position.y,
            position_z: position.z,
            color_hex: star_type.hex_string(),
            size: star_type.base_size(),
        })?;

        match galaxy.add_custom_star(record.clone()) {
            Ok(id) => {
                galaxy.animate_new_star(&id, now);
            }
            Err(err) => warn!(star = %record.id, %err, "stored star not added to galaxy"),
        }
        info!(star = %record.id, user = %user, ?star_type, "star created");
        Ok(record)
    }
}
