use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;

use super::OutputOptions;

/// Bundle-entry name to source file, in insertion order
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct BundleManifest(IndexMap<String, PathBuf>);

impl BundleManifest {
  pub fn new() -> Self {
    Self::default()
  }

  /// Add an entry, replacing the path of an existing entry with the same name
  pub fn insert(&mut self, name: impl Into<String>, path: impl Into<PathBuf>) -> Option<PathBuf> {
    self.0.insert(name.into(), path.into())
  }

  /// Key union with `other`; entries of `other` win on collisions
  pub fn merge(&mut self, other: BundleManifest) {
    self.0.extend(other.0);
  }

  pub fn get(&self, name: &str) -> Option<&PathBuf> {
    self.0.get(name)
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.0.keys().map(String::as_str)
  }

  pub fn iter(&self) -> impl Iterator<Item = (&String, &PathBuf)> {
    self.0.iter()
  }
}

impl FromIterator<(String, PathBuf)> for BundleManifest {
  fn from_iter<T: IntoIterator<Item = (String, PathBuf)>>(iter: T) -> Self {
    Self(IndexMap::from_iter(iter))
  }
}

/// The complete bundler input: entries plus output options
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BundleInput {
  pub input: BundleManifest,
  pub output: OutputOptions,
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;
  use serde_json::json;

  use super::*;

  #[test]
  fn merge_is_a_key_union_where_the_last_write_wins() {
    let mut manifest = BundleManifest::from_iter([
      (String::from("a"), PathBuf::from("a.js")),
      (String::from("b"), PathBuf::from("b.js")),
    ]);

    manifest.merge(BundleManifest::from_iter([
      (String::from("b"), PathBuf::from("other-b.js")),
      (String::from("c"), PathBuf::from("c.js")),
    ]));

    assert_eq!(manifest.names().collect::<Vec<_>>(), vec!["a", "b", "c"]);
    assert_eq!(manifest.get("b"), Some(&PathBuf::from("other-b.js")));
    assert_eq!(manifest.get("c"), Some(&PathBuf::from("c.js")));
  }

  #[test]
  fn serializes_as_the_bundler_input_shape() {
    let mut input = BundleManifest::new();
    input.insert("dependencies/rsvp", "/project/node_modules/rsvp/lib/rsvp.js");
    input.insert("packages/ember/index", "packages/ember/index.ts");

    let bundle_input = BundleInput {
      input,
      output: OutputOptions::default(),
    };

    assert_eq!(
      serde_json::to_value(&bundle_input).unwrap(),
      json!({
        "input": {
          "dependencies/rsvp": "/project/node_modules/rsvp/lib/rsvp.js",
          "packages/ember/index": "packages/ember/index.ts"
        },
        "output": { "format": "es", "dir": "dist" }
      })
    );
  }
}
