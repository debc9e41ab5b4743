use std::path::Path;
use std::sync::Arc;

use anyhow::Error;
use async_trait::async_trait;
use entrypack_core::path::normalize_path;
use entrypack_core::plugin::{
  Resolution, ResolveContext, ResolverPlugin, TransformerPlugin, Transformation,
};
use entrypack_core::types::Asset;
use entrypack_filesystem::FileSystemRef;
use entrypack_plugin_resolver_extensionless::EntrypackExtensionlessResolverPlugin;
use entrypack_plugin_transformer_template::EntrypackTemplateTransformerPlugin;
use entrypack_plugin_transformer_version::EntrypackVersionTransformerPlugin;

use crate::Project;

/// Resolves relative and absolute specifiers that name an existing file exactly
#[derive(Debug)]
pub struct RelativeFileResolver {
  fs: FileSystemRef,
}

impl RelativeFileResolver {
  pub fn new(fs: FileSystemRef) -> Self {
    Self { fs }
  }
}

#[async_trait]
impl ResolverPlugin for RelativeFileResolver {
  async fn resolve(&self, ctx: &ResolveContext) -> Result<Resolution, Error> {
    let specifier = Path::new(&ctx.specifier);

    let path = if specifier.is_absolute() {
      specifier.to_path_buf()
    } else if ctx.is_relative() {
      let Some(parent) = ctx.importer.as_deref().and_then(Path::parent) else {
        return Ok(Resolution::Unresolved);
      };
      normalize_path(&parent.join(specifier))
    } else {
      return Ok(Resolution::Unresolved);
    };

    if self.fs.is_file(&path) {
      Ok(Resolution::Resolved(path))
    } else {
      Ok(Resolution::Unresolved)
    }
  }
}

/// The resolver and transformer plugins applied to a project's sources
#[derive(Debug)]
pub struct Pipeline {
  resolvers: Vec<Arc<dyn ResolverPlugin>>,
  transformers: Vec<Arc<dyn TransformerPlugin>>,
}

impl Pipeline {
  pub fn new(project: &Project) -> Result<Self, Error> {
    let ctx = project.plugin_context();

    let file_resolver: Arc<dyn ResolverPlugin> =
      Arc::new(RelativeFileResolver::new(project.fs.clone()));

    Ok(Self {
      resolvers: vec![Arc::new(EntrypackExtensionlessResolverPlugin::new(
        &ctx,
        file_resolver,
      ))],
      transformers: vec![
        Arc::new(EntrypackTemplateTransformerPlugin::new(&ctx)),
        Arc::new(EntrypackVersionTransformerPlugin::new(&ctx)?),
      ],
    })
  }

  /// Run each resolver in turn until one resolves the request
  #[tracing::instrument(level = "debug", skip_all, fields(specifier = %ctx.specifier))]
  pub async fn resolve(&self, ctx: &ResolveContext) -> Result<Resolution, Error> {
    for resolver in &self.resolvers {
      let resolution = resolver.resolve(ctx).await?;
      if resolution != Resolution::Unresolved {
        return Ok(resolution);
      }
    }

    Ok(Resolution::Unresolved)
  }

  /// Pass `asset` through every transformer in order
  #[tracing::instrument(level = "debug", skip_all, fields(file_path = %asset.file_path.display()))]
  pub async fn transform(&self, asset: Asset) -> Result<Asset, Error> {
    let mut asset = asset;

    for transformer in &self.transformers {
      if let Transformation::Transformed(transformed) = transformer.transform(&asset).await? {
        asset = transformed;
      }
    }

    Ok(asset)
  }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use entrypack_core::types::EntrypackConfig;
  use entrypack_test_fixtures::TestFixture;
  use pretty_assertions::assert_eq;
  use serde_json::json;

  use super::*;

  fn project() -> Project {
    let fixture = TestFixture::with_dirname(PathBuf::from("/app"));
    fixture.write_package(".", json!({ "name": "ember-source", "version": "5.1.0" }));
    fixture.write_file(
      "packages/ember/version.ts",
      "export default \"VERSION_GOES_HERE\";",
    );
    fixture.write_file("packages/ember/index.ts", "export { default as VERSION } from './version';");
    fixture.write_file("packages/@ember/component/index.ts", "");
    fixture.write_file("packages/@ember/component/template.hbs", "<p>{{this.name}}</p>");

    Project::new(
      fixture.fs.clone(),
      fixture.dirname.clone(),
      EntrypackConfig::default(),
    )
  }

  async fn resolve_from(pipeline: &Pipeline, specifier: &str, importer: &str) -> Resolution {
    pipeline
      .resolve(&ResolveContext::new(
        specifier,
        Some(PathBuf::from(importer)),
      ))
      .await
      .unwrap()
  }

  #[tokio::test]
  async fn resolves_exact_relative_files() {
    let pipeline = Pipeline::new(&project()).unwrap();

    assert_eq!(
      resolve_from(&pipeline, "./version.ts", "/app/packages/ember/index.ts").await,
      Resolution::Resolved(PathBuf::from("/app/packages/ember/version.ts"))
    );
  }

  #[tokio::test]
  async fn resolves_extensionless_relative_files() {
    let pipeline = Pipeline::new(&project()).unwrap();

    assert_eq!(
      resolve_from(&pipeline, "./version", "/app/packages/ember/index.ts").await,
      Resolution::Resolved(PathBuf::from("/app/packages/ember/version.ts"))
    );
  }

  #[tokio::test]
  async fn resolves_directory_index_files() {
    let pipeline = Pipeline::new(&project()).unwrap();

    assert_eq!(
      resolve_from(&pipeline, "../@ember/component", "/app/packages/ember/index.ts").await,
      Resolution::Resolved(PathBuf::from("/app/packages/@ember/component/index.ts"))
    );
  }

  #[tokio::test]
  async fn leaves_bare_specifiers_unresolved() {
    let pipeline = Pipeline::new(&project()).unwrap();

    assert_eq!(
      resolve_from(&pipeline, "@glimmer/runtime", "/app/packages/ember/index.ts").await,
      Resolution::Unresolved
    );
  }

  #[tokio::test]
  async fn replaces_the_version_placeholder() {
    let project = project();
    let pipeline = Pipeline::new(&project).unwrap();
    let path = PathBuf::from("/app/packages/ember/version.ts");

    let asset = pipeline
      .transform(Asset::from_file(&*project.fs, &path).unwrap())
      .await
      .map_err(|e| e.to_string());

    assert_eq!(
      asset,
      Ok(Asset::new(path, "export default \"5.1.0\";"))
    );
  }

  #[tokio::test]
  async fn compiles_templates() {
    let project = project();
    let pipeline = Pipeline::new(&project).unwrap();
    let path = PathBuf::from("/app/packages/@ember/component/template.hbs");

    let asset = pipeline
      .transform(Asset::from_file(&*project.fs, &path).unwrap())
      .await
      .unwrap();

    assert_eq!(
      asset.code,
      concat!(
        "import { hbs } from 'ember-cli-htmlbars';\n",
        "export default hbs(\"<p>{{this.name}}</p>\", { moduleName: \"packages/@ember/component/template.hbs\" });\n"
      )
    );
  }

  #[tokio::test]
  async fn other_modules_pass_through_unchanged() {
    let project = project();
    let pipeline = Pipeline::new(&project).unwrap();
    let asset = Asset::new("/app/packages/ember/index.ts", "export const VERSION_GOES_HERE = 1;");

    assert_eq!(pipeline.transform(asset.clone()).await.unwrap(), asset);
  }

  #[test]
  fn requires_a_project_version() {
    let fixture = TestFixture::with_dirname(PathBuf::from("/unversioned"));
    fixture.write_package(".", json!({ "name": "ember-source" }));

    let project = Project::new(
      fixture.fs.clone(),
      fixture.dirname.clone(),
      EntrypackConfig::default(),
    );

    assert!(Pipeline::new(&project).is_err());
  }
}
