use entrypack_core::path::normalize_path;
use entrypack_core::types::{BundleManifest, VendoredDependency};
use entrypack_filesystem::FileSystem;
use entrypack_package_cache::PackageResolver;

use super::{dependency_entry_name, find_from_project};
use crate::{ManifestError, ManifestResult};

/// Resolve each vendored dependency to the explicit file it is bundled through
///
/// Both the package and the file must exist.
#[tracing::instrument(level = "info", skip_all, fields(count = dependencies.len()))]
pub fn vendored_dependencies(
  resolver: &dyn PackageResolver,
  fs: &dyn FileSystem,
  dependencies: &[VendoredDependency],
) -> ManifestResult<BundleManifest> {
  let mut manifest = BundleManifest::new();

  for VendoredDependency { name, entry } in dependencies {
    let package = find_from_project(resolver, &[name.as_str()])?;
    let path = normalize_path(&package.root.join(entry));

    if !fs.is_file(&path) {
      return Err(ManifestError::VendoredEntryNotFound {
        name: name.clone(),
        entry: entry.clone(),
        path,
      });
    }

    manifest.insert(dependency_entry_name(name), path);
  }

  Ok(manifest)
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use entrypack_package_cache::PackageCache;
  use entrypack_test_fixtures::TestFixture;
  use pretty_assertions::assert_eq;
  use serde_json::json;

  use super::*;

  fn fixture() -> TestFixture {
    let fixture = TestFixture::with_dirname(PathBuf::from("/project"));
    fixture.write_package(".", json!({ "name": "ember-source" }));
    fixture.write_node_module(".", "rsvp", json!({}));
    fixture.write_file("node_modules/rsvp/lib/rsvp.js", "");
    fixture.write_node_module(".", "backburner.js", json!({}));
    fixture.write_file("node_modules/backburner.js/dist/es6/backburner.js", "");
    fixture
  }

  #[test]
  fn resolves_explicit_files_inside_packages() {
    let fixture = fixture();
    let cache = PackageCache::new(fixture.fs.clone(), fixture.dirname.clone());

    let manifest = vendored_dependencies(
      &cache,
      &*fixture.fs,
      &[
        VendoredDependency::new("backburner.js", "dist/es6/backburner.js"),
        VendoredDependency::new("rsvp", "./lib/rsvp.js"),
      ],
    )
    .unwrap();

    assert_eq!(
      manifest,
      BundleManifest::from_iter([
        (
          String::from("dependencies/backburner.js"),
          PathBuf::from("/project/node_modules/backburner.js/dist/es6/backburner.js")
        ),
        (
          String::from("dependencies/rsvp"),
          PathBuf::from("/project/node_modules/rsvp/lib/rsvp.js")
        ),
      ])
    );
  }

  #[test]
  fn missing_files_are_fatal() {
    let fixture = fixture();
    let cache = PackageCache::new(fixture.fs.clone(), fixture.dirname.clone());

    let err = vendored_dependencies(
      &cache,
      &*fixture.fs,
      &[VendoredDependency::new("rsvp", "dist/rsvp.es.js")],
    )
    .unwrap_err();

    assert_eq!(
      err.to_string(),
      "Cannot find module 'rsvp/dist/rsvp.es.js' at /project/node_modules/rsvp/dist/rsvp.es.js"
    );
  }

  #[test]
  fn missing_packages_are_fatal() {
    let fixture = fixture();
    let cache = PackageCache::new(fixture.fs.clone(), fixture.dirname.clone());

    let err = vendored_dependencies(
      &cache,
      &*fixture.fs,
      &[VendoredDependency::new("dag-map", "dag-map.js")],
    )
    .unwrap_err();

    assert!(matches!(err, ManifestError::Package(_)));
  }
}
