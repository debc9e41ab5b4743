use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Error;
use async_trait::async_trait;
use entrypack_core::path::normalize_path;
use entrypack_core::plugin::{PluginContext, Resolution, ResolveContext, ResolverPlugin};
use entrypack_filesystem::FileSystemRef;

/// Resolves `./foo` to `./foo/index.<ext>` or `./foo.<ext>` when the wrapped resolver cannot
///
/// The wrapped resolver is awaited exactly once per request. Its result is returned unchanged
/// unless it is `Unresolved` and the specifier is relative.
#[derive(Debug)]
pub struct EntrypackExtensionlessResolverPlugin {
  file_system: FileSystemRef,
  extension: String,
  inner: Arc<dyn ResolverPlugin>,
}

impl EntrypackExtensionlessResolverPlugin {
  pub fn new(ctx: &PluginContext, inner: Arc<dyn ResolverPlugin>) -> Self {
    EntrypackExtensionlessResolverPlugin {
      file_system: ctx.file_system.clone(),
      extension: ctx.options.entrypack_config.resolve_extension.clone(),
      inner,
    }
  }

  fn candidates(&self, stem: &Path) -> [PathBuf; 2] {
    let mut with_extension = stem.as_os_str().to_owned();
    with_extension.push(format!(".{}", self.extension));

    [
      stem.join(format!("index.{}", self.extension)),
      PathBuf::from(with_extension),
    ]
  }
}

#[async_trait]
impl ResolverPlugin for EntrypackExtensionlessResolverPlugin {
  async fn resolve(&self, ctx: &ResolveContext) -> Result<Resolution, Error> {
    let resolution = self.inner.resolve(ctx).await?;

    if resolution != Resolution::Unresolved || !ctx.is_relative() {
      return Ok(resolution);
    }

    let Some(importer) = ctx.importer.as_deref() else {
      return Ok(resolution);
    };

    let stem = normalize_path(
      &importer
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(&ctx.specifier),
    );

    for candidate in self.candidates(&stem) {
      if self.file_system.is_file(&candidate) {
        tracing::trace!(
          specifier = %ctx.specifier,
          resolved = %candidate.display(),
          "Resolved extension-less import"
        );
        return Ok(Resolution::Resolved(candidate));
      }
    }

    Ok(resolution)
  }
}
