use std::path::Path;
use std::path::PathBuf;

use entrypack_filesystem::FileSystem;

/// A source file flowing through the transformer pipeline
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Asset {
  pub file_path: PathBuf,
  pub code: String,
}

impl Asset {
  pub fn new(file_path: impl Into<PathBuf>, code: impl Into<String>) -> Self {
    Self {
      file_path: file_path.into(),
      code: code.into(),
    }
  }

  pub fn from_file(fs: &dyn FileSystem, file_path: &Path) -> std::io::Result<Self> {
    Ok(Self {
      code: fs.read_to_string(file_path)?,
      file_path: file_path.to_path_buf(),
    })
  }

  /// Whether the file name ends with `.<extension>`
  pub fn has_extension(&self, extension: &str) -> bool {
    self
      .file_path
      .extension()
      .is_some_and(|ext| ext == extension)
  }
}
