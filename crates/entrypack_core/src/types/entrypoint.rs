use std::path::Path;
use std::path::PathBuf;

use crate::path::normalize_path;

/// The file a package designates as its importable module boundary
#[derive(Clone, Debug, PartialEq)]
pub struct Entrypoint {
  pub dir: PathBuf,
  pub base: String,
  pub path: PathBuf,
}

impl Entrypoint {
  /// Resolve `entry` (as declared in a manifest field) against `root`
  ///
  /// `.` and `..` segments are folded without touching the file-system.
  pub fn resolve(root: &Path, entry: &str) -> Self {
    let path = normalize_path(&root.join(entry));
    let dir = path.parent().map(Path::to_path_buf).unwrap_or_default();
    let base = path
      .file_name()
      .map(|name| name.to_string_lossy().into_owned())
      .unwrap_or_default();

    Entrypoint { dir, base, path }
  }
}

#[cfg(test)]
mod tests {
  use pretty_assertions::assert_eq;

  use super::*;

  #[test]
  fn splits_the_resolved_path() {
    let entrypoint = Entrypoint::resolve(
      Path::new("/project/node_modules/@glimmer/runtime"),
      "./dist/prod/index.js",
    );

    assert_eq!(
      entrypoint,
      Entrypoint {
        dir: PathBuf::from("/project/node_modules/@glimmer/runtime/dist/prod"),
        base: String::from("index.js"),
        path: PathBuf::from("/project/node_modules/@glimmer/runtime/dist/prod/index.js"),
      }
    );
  }

  #[test]
  fn folds_parent_segments() {
    let entrypoint = Entrypoint::resolve(Path::new("/pkg/lib"), "../es/main.js");

    assert_eq!(entrypoint.path, PathBuf::from("/pkg/es/main.js"));
    assert_eq!(entrypoint.base, "main.js");
  }
}
