//! Directory resolution for config, data, and logs.

use std::path::{Path, PathBuf};

const APP_NAME: &str = "starweave";

/// File name of the default JSON star store inside the data directory.
pub const STORE_FILE_NAME: &str = "stars.json";

/// Errors that can occur while resolving directories.
#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    /// The OS did not provide a configuration directory.
    #[error("could not determine OS configuration directory")]
    NoConfigDir,
    /// Directory creation failed.
    #[error("platform I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// OS-specific directory paths for Starweave.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformDirs {
    /// `config.ron` lives here.
    pub config_dir: PathBuf,
    /// The default star store lives here.
    pub data_dir: PathBuf,
    pub log_dir: PathBuf,
}

impl PlatformDirs {
    /// Resolve platform directories without creating them.
    ///
    /// `config_override` replaces the config directory (from `--config`); logs
    /// then go next to it.
    pub fn resolve(config_override: Option<&Path>) -> Result<Self, PlatformError> {
        let config_base = dirs::config_dir().ok_or(PlatformError::NoConfigDir)?;
        let app_config = config_base.join(APP_NAME);
        let config_dir = config_override.map_or(app_config, Path::to_path_buf);

        let data_dir = dirs::data_dir()
            .map(|dir| dir.join(APP_NAME))
            .unwrap_or_else(|| config_dir.join("data"));

        Ok(Self {
            log_dir: config_dir.join("logs"),
            config_dir,
            data_dir,
        })
    }

    /// Resolve directories rooted under a custom base path.
    pub fn resolve_with_root(root: &Path) -> Self {
        let app_dir = root.join(APP_NAME);
        Self {
            config_dir: app_dir.join("config"),
            data_dir: app_dir.join("data"),
            log_dir: app_dir.join("logs"),
        }
    }

    /// Create all directories on disk.
    pub fn create_all(&self) -> Result<(), PlatformError> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(&self.log_dir)?;
        Ok(())
    }

    /// The configured store path, or `stars.json` in the data directory.
    pub fn store_path(&self, configured: Option<&Path>) -> PathBuf {
        configured.map_or_else(|| self.data_dir.join(STORE_FILE_NAME), Path::to_path_buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_with_root_layout() {
        let root = Path::new("/tmp/sw");
        let dirs = PlatformDirs::resolve_with_root(root);
        assert_eq!(dirs.config_dir, root.join("starweave/config"));
        assert_eq!(dirs.data_dir, root.join("starweave/data"));
        assert_eq!(dirs.log_dir, root.join("starweave/logs"));
    }

    #[test]
    fn test_create_all_makes_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let dirs = PlatformDirs::resolve_with_root(tmp.path());
        dirs.create_all().unwrap();
        assert!(dirs.config_dir.is_dir());
        assert!(dirs.data_dir.is_dir());
        assert!(dirs.log_dir.is_dir());
    }

    #[test]
    fn test_store_path_prefers_configured() {
        let dirs = PlatformDirs::resolve_with_root(Path::new("/tmp/sw"));
        assert_eq!(
            dirs.store_path(None),
            Path::new("/tmp/sw/starweave/data/stars.json")
        );
        assert_eq!(
            dirs.store_path(Some(Path::new("/srv/stars.json"))),
            Path::new("/srv/stars.json")
        );
    }
}
