use std::path::{Path, PathBuf};
use std::sync::Arc;

use entrypack_filesystem::{in_memory_file_system::InMemoryFileSystem, FileSystemRef};

// Re-export indoc for convenience in tests
pub use indoc::indoc;

/// An in-memory project tree rooted at `dirname`
#[derive(Clone)]
pub struct TestFixture {
  pub fs: FileSystemRef,
  pub in_memory_fs: Arc<InMemoryFileSystem>, // Keep a direct reference for writing
  pub dirname: PathBuf,
}

impl TestFixture {
  pub fn with_dirname(dirname: PathBuf) -> Self {
    let in_memory_fs = Arc::new(InMemoryFileSystem::default());
    in_memory_fs.set_current_working_directory(&dirname);

    Self {
      fs: in_memory_fs.clone() as FileSystemRef,
      in_memory_fs,
      dirname,
    }
  }

  fn full_path(&self, path: &str) -> PathBuf {
    if Path::new(path).is_absolute() {
      PathBuf::from(path)
    } else {
      self.dirname.join(path)
    }
  }

  /// Write a single file
  pub fn write_file(&self, path: &str, content: &str) -> &Self {
    self
      .in_memory_fs
      .write_file(&self.full_path(path), content.to_string());
    self
  }

  /// Write `<dir>/package.json` with the given manifest
  pub fn write_package(&self, dir: &str, package_json: serde_json::Value) -> &Self {
    let path = self.full_path(dir).join("package.json");
    self
      .in_memory_fs
      .write_file(&path, package_json.to_string());
    self
  }

  /// Write a package installed under `<dir>/node_modules/<name>`
  ///
  /// The manifest gets a `name` field when it does not declare one.
  pub fn write_node_module(&self, dir: &str, name: &str, package_json: serde_json::Value) -> &Self {
    let mut package_json = package_json;
    if let Some(fields) = package_json.as_object_mut() {
      fields
        .entry("name")
        .or_insert_with(|| serde_json::Value::String(name.to_string()));
    }

    let package_dir = self.full_path(dir).join("node_modules").join(name);
    self.write_package(&package_dir.to_string_lossy(), package_json)
  }

  /// Check if a file exists
  pub fn file_exists(&self, path: &Path) -> bool {
    self.fs.is_file(path)
  }
}

/// Macro to create test files in an InMemoryFileSystem
/// Supports both regular strings and multi-line strings with automatic indoc processing
/// Returns the FileSystemRef for use in tests
#[macro_export]
macro_rules! test_fixture {
    ($dirname:expr, $($path:literal => {$content:literal}),* $(,)?) => {{
        let fixture = $crate::TestFixture::with_dirname($dirname);
        $(
            fixture.write_file($path, $crate::indoc!($content));
        )*
        fixture.fs
    }};

    ($dirname:expr, $($path:literal => $content:expr),* $(,)?) => {{
        let fixture = $crate::TestFixture::with_dirname($dirname);
        $(
            fixture.write_file($path, &$content);
        )*
        fixture.fs
    }};
}
