use entrypack_core::types::{BundleInput, BundleManifest};

use crate::dependencies::{vendored_dependencies, walk_dependencies, DependencyWalk};
use crate::packages::package_entrypoints;
use crate::{ManifestResult, Project};

/// Entries for third-party runtime code: vendored files, then the namespaced dependency walk
#[tracing::instrument(level = "info", skip_all)]
pub fn dependency_entrypoints(project: &Project) -> ManifestResult<BundleManifest> {
  let config = &project.config;
  let resolver = project.package_cache.as_ref();

  let mut manifest = vendored_dependencies(resolver, &*project.fs, &config.vendored_dependencies)?;

  manifest.merge(walk_dependencies(
    resolver,
    &*project.fs,
    DependencyWalk {
      roots: &config.dependency_roots,
      namespace_filters: &config.namespace_filters,
      entrypoint_field: &config.entrypoint_field,
    },
  )?);

  Ok(manifest)
}

/// The full bundler input for `project`
///
/// Dependency entries come first; source entries are merged over them.
#[tracing::instrument(level = "info", skip_all, fields(project_root = %project.project_root.display()))]
pub fn build_bundle_input(project: &Project) -> ManifestResult<BundleInput> {
  let mut input = dependency_entrypoints(project)?;
  input.merge(package_entrypoints(
    &*project.fs,
    &project.project_root,
    &project.config,
  )?);

  tracing::info!(entries = input.len(), "Built bundle manifest");

  Ok(BundleInput {
    input,
    output: project.config.output.clone(),
  })
}
