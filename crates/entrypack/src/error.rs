use std::path::PathBuf;

use entrypack_core::config_loader::ConfigError;
use entrypack_package_cache::PackageCacheError;
use thiserror::Error;

pub type ManifestResult<T> = std::result::Result<T, ManifestError>;

#[derive(Debug, Error)]
pub enum ManifestError {
  #[error("{}", .0)]
  Package(#[from] PackageCacheError),

  #[error("{}", .0)]
  Config(#[from] ConfigError),

  #[error("Cannot find module '{name}/{entry}' at {}", path.display())]
  VendoredEntryNotFound {
    name: String,
    entry: String,
    path: PathBuf,
  },

  #[error("{}", .0)]
  Io(#[from] std::io::Error),
}
