use std::path::Component;
use std::path::Path;
use std::path::PathBuf;

/// Fold `.` and `..` segments without touching the file-system
pub fn normalize_path(path: &Path) -> PathBuf {
  let mut result = PathBuf::new();
  for component in path.components() {
    match component {
      Component::CurDir => {}
      Component::ParentDir => {
        result.pop();
      }
      other => result.push(other),
    }
  }
  result
}
