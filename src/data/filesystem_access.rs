//! Lookup of model and label resources on disk.
//!
//! Represents the directories searched for a resource: Current, Config and Cache.
use std::path::{Path, PathBuf};
use crate::data::CROSS_MARK;

const APP_DIR: &str = "waste_detect";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FsAccess {
    Current,
    Config,
    Cache,
}

impl FsAccess {
    /// Search order used by [`FsAccess::resolve`].
    pub const SEARCH_ORDER: [FsAccess; 3] = [FsAccess::Current, FsAccess::Config, FsAccess::Cache];

    /// Finds `name` on disk.
    ///
    /// `extension` (without the dot) is appended when `name` does not already end with it,
    /// compared case-insensitively. An existing absolute path is returned as is; otherwise the
    /// current directory, then `<config>/waste_detect`, then `<cache>/waste_detect` are tried.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - The first existing candidate.
    pub fn resolve(name: &str, extension: Option<&str>) -> anyhow::Result<PathBuf> {
        let name = match extension {
            Some(ext) => Self::ensure_extension(name, ext),
            None => name.to_string(),
        };
        let path = Path::new(&name);

        if path.is_absolute() {
            if path.exists() {
                log::debug!("Loading resource from filesystem: {}", path.display());
                return Ok(path.to_path_buf());
            }
            anyhow::bail!("{CROSS_MARK} Resource not found: {}", path.display());
        }

        for access in Self::SEARCH_ORDER {
            let Some(mut candidate) = access.base_path() else {
                continue;
            };
            candidate.push(path);
            if candidate.exists() {
                log::debug!("Loading resource from {:?} directory: {}", access, candidate.display());
                return Ok(candidate);
            }
        }

        anyhow::bail!(
            "{CROSS_MARK} Resource {} not found in the current, config or cache directory",
            name
        )
    }

    /// Appends `.{extension}` unless `name` already ends with it (case-insensitive).
    pub fn ensure_extension(name: &str, extension: &str) -> String {
        let suffix = format!(".{}", extension.to_lowercase());
        if name.to_lowercase().ends_with(&suffix) {
            name.to_string()
        } else {
            format!("{name}.{extension}")
        }
    }

    /// Base directory for this location, `waste_detect` sub-directory included for Config/Cache.
    fn base_path(&self) -> Option<PathBuf> {
        match self {
            FsAccess::Current => std::env::current_dir().ok(),
            FsAccess::Config => dirs::config_dir().map(|p| p.join(APP_DIR)),
            FsAccess::Cache => dirs::cache_dir().map(|p| p.join(APP_DIR)),
        }
    }
}
