use std::path::Path;
use std::path::PathBuf;

use anyhow::anyhow;
use anyhow::Error;
use async_trait::async_trait;
use entrypack_core::path::normalize_path;
use entrypack_core::plugin::{PluginContext, TransformerPlugin, Transformation};
use entrypack_core::types::Asset;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct ProjectPackageJson {
  version: Option<String>,
}

/// Replaces the version placeholder in the one designated version module
///
/// The version is read from the project `package.json` when the plugin is created.
#[derive(Debug)]
pub struct EntrypackVersionTransformerPlugin {
  placeholder: String,
  project_root: PathBuf,
  version: String,
  version_file: PathBuf,
}

impl EntrypackVersionTransformerPlugin {
  pub fn new(ctx: &PluginContext) -> Result<Self, Error> {
    let package_json = ctx.config.load_package_json::<ProjectPackageJson>()?;
    let version = package_json
      .contents
      .version
      .ok_or_else(|| anyhow!("No version field in {}", package_json.path.display()))?;

    let config = &ctx.options.entrypack_config;
    let project_root = ctx.options.project_root.clone();

    tracing::debug!(%version, "Loaded project version");

    Ok(EntrypackVersionTransformerPlugin {
      placeholder: config.version_placeholder.clone(),
      version_file: normalize_path(&project_root.join(&config.version_file)),
      project_root,
      version,
    })
  }

  fn is_version_file(&self, file_path: &Path) -> bool {
    normalize_path(&self.project_root.join(file_path)) == self.version_file
  }
}

#[async_trait]
impl TransformerPlugin for EntrypackVersionTransformerPlugin {
  async fn transform(&self, asset: &Asset) -> Result<Transformation, Error> {
    if !self.is_version_file(&asset.file_path) {
      return Ok(Transformation::Skip);
    }

    Ok(Transformation::Transformed(Asset {
      file_path: asset.file_path.clone(),
      code: asset.code.replace(&self.placeholder, &self.version),
    }))
  }
}
