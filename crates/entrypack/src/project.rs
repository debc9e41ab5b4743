use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use entrypack_core::config_loader::{ConfigError, ConfigLoader};
use entrypack_core::plugin::{PluginContext, PluginOptions};
use entrypack_core::types::EntrypackConfig;
use entrypack_filesystem::FileSystemRef;
use entrypack_package_cache::PackageCache;

use crate::ManifestResult;

pub const CONFIG_FILE_NAME: &str = "entrypack.json";

/// Everything a manifest build or plugin pipeline needs to know about the project
#[derive(Debug)]
pub struct Project {
  pub fs: FileSystemRef,
  pub project_root: PathBuf,
  pub config: EntrypackConfig,
  pub package_cache: Arc<PackageCache>,
}

impl Project {
  pub fn new(fs: FileSystemRef, project_root: PathBuf, config: EntrypackConfig) -> Self {
    let package_cache = Arc::new(PackageCache::new(fs.clone(), project_root.clone()));

    Self {
      fs,
      project_root,
      config,
      package_cache,
    }
  }

  /// Load the project config, either from `config_path` or from `entrypack.json` in the project
  /// root, and attach the process-wide package cache for the project root
  pub fn load(
    fs: FileSystemRef,
    project_root: &Path,
    config_path: Option<&Path>,
  ) -> ManifestResult<Self> {
    let project_root = fs.canonicalize(project_root)?;
    let config = load_config(&fs, &project_root, config_path)?;
    let package_cache = PackageCache::shared(env!("CARGO_PKG_NAME"), &project_root, fs.clone());

    Ok(Self {
      fs,
      project_root,
      config,
      package_cache,
    })
  }

  /// Resolve a command line path against the working directory, through any symlinks
  ///
  /// Plugins compare paths against the canonical project root, so files reached through a
  /// symlinked directory must be canonicalized the same way.
  pub fn canonical_path(&self, path: &Path) -> std::io::Result<PathBuf> {
    self.fs.canonicalize(&std::env::current_dir()?.join(path))
  }

  pub fn config_loader(&self) -> ConfigLoader {
    ConfigLoader::new(self.fs.clone(), self.project_root.clone())
  }

  pub fn plugin_context(&self) -> PluginContext {
    PluginContext {
      config: Arc::new(self.config_loader()),
      file_system: self.fs.clone(),
      options: Arc::new(PluginOptions {
        project_root: self.project_root.clone(),
        entrypack_config: self.config.clone(),
      }),
    }
  }
}

fn load_config(
  fs: &FileSystemRef,
  project_root: &Path,
  config_path: Option<&Path>,
) -> Result<EntrypackConfig, ConfigError> {
  let Some(config_path) = config_path else {
    return ConfigLoader::new(fs.clone(), project_root.to_path_buf())
      .load_json_config_or_default::<EntrypackConfig>(CONFIG_FILE_NAME);
  };

  let config_path = project_root.join(config_path);
  let code = fs.read_to_string(&config_path)?;

  serde_json::from_str(&code).map_err(|error| ConfigError::Parse {
    line: error.line(),
    column: error.column(),
    message: error.to_string(),
    path: config_path,
  })
}
