use std::sync::Arc;

use assert_fs::prelude::*;
use assert_fs::TempDir;
use entrypack::pipeline::Pipeline;
use entrypack::{build_bundle_input, Project};
use entrypack_core::plugin::{Resolution, ResolveContext};
use entrypack_core::types::Asset;
use entrypack_filesystem::os_file_system::OsFileSystem;
use pretty_assertions::assert_eq;
use serde_json::json;

fn write_json(dir: &TempDir, path: &str, value: serde_json::Value) {
  dir.child(path).write_str(&value.to_string()).unwrap();
}

fn framework_checkout() -> TempDir {
  let dir = TempDir::new().unwrap();

  write_json(&dir, "package.json", json!({ "name": "ember-source", "version": "5.4.0" }));
  write_json(
    &dir,
    "entrypack.json",
    json!({
      "vendoredDependencies": [{ "name": "rsvp", "entry": "lib/rsvp.js" }],
      "dependencyRoots": ["@glimmer/runtime"],
      "rolledUpPackages": ["@ember/-internals/metal"]
    }),
  );
  write_json(
    &dir,
    "node_modules/rsvp/package.json",
    json!({ "name": "rsvp" }),
  );
  dir.child("node_modules/rsvp/lib/rsvp.js").touch().unwrap();
  write_json(
    &dir,
    "node_modules/@glimmer/runtime/package.json",
    json!({
      "name": "@glimmer/runtime",
      "module": "dist/index.js",
      "dependencies": { "@glimmer/util": "*", "router_js": "*" }
    }),
  );
  dir
    .child("node_modules/@glimmer/runtime/dist/index.js")
    .touch()
    .unwrap();
  write_json(
    &dir,
    "node_modules/@glimmer/util/package.json",
    json!({ "name": "@glimmer/util", "module": "dist/index.js" }),
  );
  dir
    .child("node_modules/@glimmer/util/dist/index.js")
    .touch()
    .unwrap();
  write_json(
    &dir,
    "node_modules/router_js/package.json",
    json!({ "name": "router_js", "module": "dist/index.js" }),
  );
  dir
    .child("node_modules/router_js/dist/index.js")
    .touch()
    .unwrap();

  dir
    .child("packages/ember/index.ts")
    .write_str("export { default as VERSION } from './version';\n")
    .unwrap();
  dir
    .child("packages/ember/version.ts")
    .write_str("export default \"VERSION_GOES_HERE\";\n")
    .unwrap();
  dir
    .child("packages/ember/tests/version_test.js")
    .touch()
    .unwrap();
  dir
    .child("packages/@ember/-internals/metal/index.ts")
    .touch()
    .unwrap();
  dir
    .child("packages/@ember/-internals/metal/lib/tags.ts")
    .touch()
    .unwrap();

  dir
}

fn load(dir: &TempDir) -> Project {
  Project::load(Arc::new(OsFileSystem), dir.path(), None).unwrap()
}

#[test]
fn builds_the_manifest_for_a_checkout_on_disk() {
  let dir = framework_checkout();
  let project = load(&dir);
  let root = &project.project_root;

  let bundle_input = build_bundle_input(&project).unwrap();

  assert_eq!(
    serde_json::to_value(&bundle_input).unwrap(),
    json!({
      "input": {
        "dependencies/rsvp": root.join("node_modules/rsvp/lib/rsvp.js"),
        "dependencies/@glimmer/runtime": root.join("node_modules/@glimmer/runtime/dist/index.js"),
        "dependencies/@glimmer/util": root.join("node_modules/@glimmer/util/dist/index.js"),
        "packages/ember/index": "packages/ember/index.ts",
        "packages/ember/version": "packages/ember/version.ts",
        "packages/@ember/-internals/metal/index": "packages/@ember/-internals/metal/index.ts"
      },
      "output": { "format": "es", "dir": "dist" }
    })
  );
}

#[cfg(unix)]
#[tokio::test]
async fn replaces_the_version_when_reached_through_a_symlink() {
  let dir = framework_checkout();
  let link = TempDir::new().unwrap();
  link
    .child("checkout")
    .symlink_to_dir(dir.path())
    .unwrap();
  let linked_root = link.path().join("checkout");

  let project = Project::load(Arc::new(OsFileSystem), &linked_root, None).unwrap();
  let pipeline = Pipeline::new(&project).unwrap();
  let version_file = project
    .canonical_path(&linked_root.join("packages/ember/version.ts"))
    .unwrap();

  let version = pipeline
    .transform(Asset::from_file(&*project.fs, &version_file).unwrap())
    .await
    .unwrap();

  assert_eq!(version.file_path, project.project_root.join("packages/ember/version.ts"));
  assert_eq!(version.code, "export default \"5.4.0\";\n");
}

#[tokio::test]
async fn transforms_and_resolves_modules_on_disk() {
  let dir = framework_checkout();
  let project = load(&dir);
  let pipeline = Pipeline::new(&project).unwrap();
  let packages = project.project_root.join("packages/ember");

  let version = pipeline
    .transform(Asset::from_file(&*project.fs, &packages.join("version.ts")).unwrap())
    .await
    .unwrap();
  let resolution = pipeline
    .resolve(&ResolveContext::new(
      "./version",
      Some(packages.join("index.ts")),
    ))
    .await
    .unwrap();

  assert_eq!(version.code, "export default \"5.4.0\";\n");
  assert_eq!(resolution, Resolution::Resolved(packages.join("version.ts")));
}
