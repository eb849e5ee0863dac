//! Backing store for custom star records.

use std::path::{Path, PathBuf};

use chrono::Utc;
use starweave_galaxy::{StarId, StarRecord, UserId};
use tracing::{debug, info};

use crate::draft::NewStarRecord;
use crate::error::CatalogError;

/// The persistence seam for custom stars.
///
/// Both listings are ordered newest first.
pub trait StarStore {
    /// Every stored star.
    fn list_custom_stars(&self) -> Result<Vec<StarRecord>, CatalogError>;

    /// Persist a new star, assigning its id and creation time.
    fn create_custom_star(&mut self, new: NewStarRecord) -> Result<StarRecord, CatalogError>;

    /// Stars owned by one user.
    fn list_user_stars(&self, user: &UserId) -> Result<Vec<StarRecord>, CatalogError> {
        Ok(self
            .list_custom_stars()?
            .into_iter()
            .filter(|record| &record.user_id == user)
            .collect())
    }
}

/// In-process store. Ids are `star-<n>` in creation order.
#[derive(Debug, Default)]
pub struct MemoryStarStore {
    rows: Vec<StarRecord>,
    next_id: u64,
}

impl MemoryStarStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-filled with existing rows. Fresh ids continue after the
    /// highest `star-<n>` already present.
    pub fn with_records(rows: Vec<StarRecord>) -> Self {
        let next_id = rows
            .iter()
            .filter_map(|row| row.id.0.strip_prefix("star-")?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self { rows, next_id }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn rows(&self) -> &[StarRecord] {
        &self.rows
    }
}

/// Newest first; rows created in the same instant keep reverse insertion
/// order.
fn newest_first(rows: &[StarRecord]) -> Vec<StarRecord> {
    let mut sorted: Vec<StarRecord> = rows.iter().rev().cloned().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

impl StarStore for MemoryStarStore {
    fn list_custom_stars(&self) -> Result<Vec<StarRecord>, CatalogError> {
        Ok(newest_first(&self.rows))
    }

    fn create_custom_star(&mut self, new: NewStarRecord) -> Result<StarRecord, CatalogError> {
        self.next_id += 1;
        let record = new.into_record(StarId(format!("star-{}", self.next_id)), Utc::now());
        self.rows.push(record.clone());
        debug!(star = %record.id, user = %record.user_id, "star stored");
        Ok(record)
    }
}

/// Store backed by a JSON array file, loaded on open and rewritten on every
/// create.
#[derive(Debug)]
pub struct JsonFileStarStore {
    path: PathBuf,
    inner: MemoryStarStore,
}

impl JsonFileStarStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: &Path) -> Result<Self, CatalogError> {
        let rows: Vec<StarRecord> = if path.exists() {
            let contents = std::fs::read_to_string(path)?;
            serde_json::from_str(&contents)?
        } else {
            Vec::new()
        };
        info!(path = %path.display(), stars = rows.len(), "opened star store");
        Ok(Self {
            path: path.to_path_buf(),
            inner: MemoryStarStore::with_records(rows),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn persist(&self) -> Result<(), CatalogError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self.inner.rows())?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl StarStore for JsonFileStarStore {
    fn list_custom_stars(&self) -> Result<Vec<StarRecord>, CatalogError> {
        self.inner.list_custom_stars()
    }

    fn create_custom_star(&mut self, new: NewStarRecord) -> Result<StarRecord, CatalogError> {
        let record = self.inner.create_custom_star(new)?;
        if let Err(err) = self.persist() {
            self.inner.rows.pop();
            self.inner.next_id -= 1;
            return Err(err);
        }
        Ok(record)
    }
}
