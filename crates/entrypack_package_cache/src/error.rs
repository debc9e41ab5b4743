use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct JsonError {
  pub path: PathBuf,
  pub line: usize,
  pub column: usize,
  pub message: String,
}

impl JsonError {
  pub fn new(path: PathBuf, err: serde_json::Error) -> JsonError {
    JsonError {
      path,
      line: err.line(),
      column: err.column(),
      message: err.to_string(),
    }
  }
}

#[derive(Debug, Error)]
pub enum PackageCacheError {
  #[error("Unable to resolve package '{name}' from {}", from.display())]
  NotFound { name: String, from: PathBuf },

  #[error("Error parsing {}: {}", .0.path.display(), .0.message)]
  Json(JsonError),

  #[error("{}", .0)]
  Io(#[from] std::io::Error),
}

impl PackageCacheError {
  pub fn is_not_found(&self) -> bool {
    matches!(self, PackageCacheError::NotFound { .. })
  }
}
