use std::path::PathBuf;
use std::sync::Arc;

use crate::PackageJson;

/// A package on disk, as handed out by a [`PackageResolver`]
///
/// Two `Package`s are the same package when their `root` is the same.
#[derive(Debug, Clone, PartialEq)]
pub struct Package {
  pub name: String,
  pub root: PathBuf,
  pub package_json: Arc<PackageJson>,
  /// Whether this is the application (project root) package
  pub is_app: bool,
}

/// Resolves packages by name and enumerates their runtime dependencies
#[mockall::automock]
pub trait PackageResolver {
  /// The package at the project root
  fn app_package(&self) -> Result<Arc<Package>, crate::PackageCacheError>;

  /// Resolve `name` the way `from` would see it
  fn resolve(&self, name: &str, from: &Package) -> Result<Arc<Package>, crate::PackageCacheError>;

  /// The packages `package` declares as runtime dependencies
  fn dependencies(&self, package: &Package) -> Result<Vec<Arc<Package>>, crate::PackageCacheError>;
}
