use std::path::PathBuf;
use std::sync::Arc;

use entrypack_filesystem::FileSystemRef;

pub use resolver_plugin::*;
pub use transformer_plugin::*;

use crate::config_loader::ConfigLoaderRef;
use crate::types::EntrypackConfig;

mod resolver_plugin;
mod transformer_plugin;

pub struct PluginContext {
  pub config: ConfigLoaderRef,
  pub file_system: FileSystemRef,
  pub options: Arc<PluginOptions>,
}

#[derive(Debug, Default)]
pub struct PluginOptions {
  pub project_root: PathBuf,
  pub entrypack_config: EntrypackConfig,
}
