use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

/// In-memory file-system for testing
pub mod in_memory_file_system;

/// File-system implementation using std::fs
pub mod os_file_system;

pub mod search;

/// FileSystem abstraction instance
///
/// This should be `OsFileSystem` for non-testing environments and `InMemoryFileSystem` for testing.
pub type FileSystemRef = Arc<dyn FileSystem + Send + Sync>;

/// Trait abstracting the file-system reads the manifest builder and plugins need
#[mockall::automock]
pub trait FileSystem: std::fmt::Debug {
  fn canonicalize(&self, path: &Path) -> std::io::Result<PathBuf>;

  fn read(&self, path: &Path) -> std::io::Result<Vec<u8>>;
  fn read_to_string(&self, path: &Path) -> std::io::Result<String>;

  /// List the direct children of a directory, sorted by path
  fn read_dir(&self, path: &Path) -> std::io::Result<Vec<PathBuf>>;

  fn is_file(&self, path: &Path) -> bool;
  fn is_dir(&self, path: &Path) -> bool;

  /// Whether `path` itself is a symbolic link, without following it
  fn is_symlink(&self, path: &Path) -> bool;
}
