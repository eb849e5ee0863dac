//! User star catalog: the backing store seam and the star creation flow.

pub mod catalog;
pub mod draft;
pub mod error;
pub mod store;

pub use catalog::StarCatalog;
pub use draft::{NewStarRecord, StarDraft};
pub use error::CatalogError;
pub use store::{JsonFileStarStore, MemoryStarStore, StarStore};
