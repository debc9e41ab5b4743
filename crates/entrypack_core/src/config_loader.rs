use std::path::PathBuf;
use std::sync::Arc;

use entrypack_filesystem::search::find_ancestor_file;
use entrypack_filesystem::FileSystemRef;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub type ConfigLoaderRef = Arc<ConfigLoader>;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Unable to locate {filename} config file from {}", search_path.display())]
  NotFound {
    filename: String,
    search_path: PathBuf,
  },

  #[error("Error parsing {}: {message}", path.display())]
  Parse {
    path: PathBuf,
    line: usize,
    column: usize,
    message: String,
  },

  #[error("{}", .0)]
  Io(#[from] std::io::Error),
}

impl ConfigError {
  pub fn is_not_found(&self) -> bool {
    matches!(self, ConfigError::NotFound { .. })
  }
}

/// Enables JSON config to be located and loaded
#[derive(Debug)]
pub struct ConfigLoader {
  pub fs: FileSystemRef,
  pub project_root: PathBuf,
  pub search_path: PathBuf,
}

#[derive(Debug, PartialEq)]
pub struct ConfigFile<T> {
  pub contents: T,
  pub path: PathBuf,
  pub raw: String,
}

impl ConfigLoader {
  pub fn new(fs: FileSystemRef, project_root: PathBuf) -> Self {
    Self {
      fs,
      search_path: project_root.clone(),
      project_root,
    }
  }

  pub fn load_json_config<Config: DeserializeOwned>(
    &self,
    filename: &str,
  ) -> Result<ConfigFile<Config>, ConfigError> {
    let path = find_ancestor_file(
      &*self.fs,
      &[filename],
      &self.search_path,
      &self.project_root,
    )
    .ok_or_else(|| ConfigError::NotFound {
      filename: filename.to_string(),
      search_path: self.search_path.clone(),
    })?;

    let code = self.fs.read_to_string(&path)?;

    let contents = serde_json::from_str::<Config>(&code).map_err(|error| ConfigError::Parse {
      path: path.clone(),
      line: error.line(),
      column: error.column(),
      message: error.to_string(),
    })?;

    tracing::debug!(path = %path.display(), "Loaded config");

    Ok(ConfigFile {
      contents,
      path,
      raw: code,
    })
  }

  /// Load `filename`, falling back to `Config::default()` when no such file exists
  pub fn load_json_config_or_default<Config: DeserializeOwned + Default>(
    &self,
    filename: &str,
  ) -> Result<Config, ConfigError> {
    match self.load_json_config::<Config>(filename) {
      Ok(config) => Ok(config.contents),
      Err(err) if err.is_not_found() => Ok(Config::default()),
      Err(err) => Err(err),
    }
  }

  pub fn load_package_json<Config: DeserializeOwned>(
    &self,
  ) -> Result<ConfigFile<Config>, ConfigError> {
    self.load_json_config::<Config>("package.json")
  }
}
