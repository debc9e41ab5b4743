use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use entrypack_core::types::{BundleManifest, Entrypoint};
use entrypack_filesystem::FileSystem;
use entrypack_package_cache::{Package, PackageCacheError, PackageResolver};

pub use vendored::*;

mod vendored;

/// Prefix of every bundle entry that points into a third-party package
pub const DEPENDENCIES_PREFIX: &str = "dependencies/";

/// Resolve `names` from the project root, each one relative to the package found before it
pub fn find_from_project(
  resolver: &dyn PackageResolver,
  names: &[&str],
) -> Result<Arc<Package>, PackageCacheError> {
  let mut current = resolver.app_package()?;
  for name in names {
    current = resolver.resolve(name, &current)?;
  }
  Ok(current)
}

/// The file named by `field` in the package's manifest, if the field is declared
pub fn entrypoint(package: &Package, field: &str) -> Option<Entrypoint> {
  let entry = package.package_json.entry_field(field)?;
  Some(Entrypoint::resolve(&package.root, entry))
}

pub fn dependency_entry_name(package_name: &str) -> String {
  format!("{DEPENDENCIES_PREFIX}{package_name}")
}

/// Options for [`walk_dependencies`]
#[derive(Clone, Copy, Debug)]
pub struct DependencyWalk<'a> {
  /// Package names the walk starts from, resolved from the project root
  pub roots: &'a [String],
  /// Only packages whose name starts with one of these are recorded and expanded
  pub namespace_filters: &'a [String],
  /// Manifest field holding the distributable module
  pub entrypoint_field: &'a str,
}

impl DependencyWalk<'_> {
  fn in_namespace(&self, package: &Package) -> bool {
    self
      .namespace_filters
      .iter()
      .any(|prefix| package.name.starts_with(prefix.as_str()))
  }
}

/// Walk the runtime dependency graph below `walk.roots`, recording module entrypoints
///
/// Packages outside the namespace filters are dropped together with everything only reachable
/// through them. Entrypoints that are not declared, or do not exist on disk, are skipped. Any
/// resolution failure aborts the walk.
#[tracing::instrument(level = "info", skip_all, fields(roots = walk.roots.len()))]
pub fn walk_dependencies(
  resolver: &dyn PackageResolver,
  fs: &dyn FileSystem,
  walk: DependencyWalk<'_>,
) -> Result<BundleManifest, PackageCacheError> {
  let mut seen: HashSet<PathBuf> = HashSet::new();
  let mut entrypoints = BundleManifest::new();
  let mut queue = walk
    .roots
    .iter()
    .map(|name| find_from_project(resolver, &[name.as_str()]))
    .collect::<Result<Vec<_>, _>>()?;

  while let Some(package) = queue.pop() {
    if !seen.insert(package.root.clone()) {
      continue;
    }

    if !walk.in_namespace(&package) {
      tracing::trace!(package = %package.name, "Skipping package outside of the namespace filters");
      continue;
    }

    match entrypoint(&package, walk.entrypoint_field) {
      Some(module) if fs.is_file(&module.path) => {
        tracing::debug!(package = %package.name, path = %module.path.display(), "Found entrypoint");
        entrypoints.insert(dependency_entry_name(&package.name), module.path);
      }
      Some(module) => {
        tracing::debug!(package = %package.name, path = %module.path.display(), "Declared entrypoint does not exist");
      }
      None => {}
    }

    queue.extend(resolver.dependencies(&package)?);
  }

  Ok(entrypoints)
}
