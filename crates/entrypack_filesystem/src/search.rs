use std::path::Path;
use std::path::PathBuf;

use crate::FileSystem;

/// Find the nearest file named one of `filenames`, starting at `from` and walking up to `root`
///
/// Directories above `root` are never searched, and nothing is found when `from` is outside
/// of `root`.
pub fn find_ancestor_file<P: AsRef<Path>>(
  fs: &dyn FileSystem,
  filenames: &[&str],
  from: P,
  root: P,
) -> Option<PathBuf> {
  let root = root.as_ref();

  for dir in from.as_ref().ancestors() {
    if !dir.starts_with(root) {
      return None;
    }

    for name in filenames {
      let fullpath = dir.join(name);
      if fs.is_file(&fullpath) {
        return Some(fullpath);
      }
    }

    if dir == root {
      break;
    }
  }

  None
}
