use std::collections::HashMap;
use std::fmt;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use entrypack_filesystem::FileSystemRef;
use indexmap::IndexSet;
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use parking_lot::RwLock;

use crate::JsonError;
use crate::Package;
use crate::PackageCacheError;
use crate::PackageJson;
use crate::PackageResolver;

type DefaultHasher = xxhash_rust::xxh3::Xxh3Builder;

static SHARED_CACHES: Lazy<Mutex<HashMap<(String, PathBuf), Arc<PackageCache>>>> =
  Lazy::new(Default::default);

/// Caches parsed packages by root, and name resolutions by requesting package
pub struct PackageCache {
  fs: FileSystemRef,
  app_root: PathBuf,
  packages: RwLock<HashMap<PathBuf, Arc<Package>, DefaultHasher>>,
  resolutions: RwLock<HashMap<(PathBuf, String), Arc<Package>, DefaultHasher>>,
  dependencies: RwLock<HashMap<PathBuf, Vec<Arc<Package>>, DefaultHasher>>,
}

impl fmt::Debug for PackageCache {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("PackageCache")
      .field("app_root", &self.app_root)
      .finish()
  }
}

impl PackageCache {
  pub fn new(fs: FileSystemRef, app_root: PathBuf) -> Self {
    Self {
      fs,
      app_root,
      packages: Default::default(),
      resolutions: Default::default(),
      dependencies: Default::default(),
    }
  }

  /// Process-wide cache for `identifier` and `app_root`
  ///
  /// The file-system of the first caller for a given key is kept.
  pub fn shared(identifier: &str, app_root: &Path, fs: FileSystemRef) -> Arc<PackageCache> {
    let mut caches = SHARED_CACHES.lock();
    caches
      .entry((identifier.to_string(), app_root.to_path_buf()))
      .or_insert_with(|| Arc::new(PackageCache::new(fs, app_root.to_path_buf())))
      .clone()
  }

  pub fn app_root(&self) -> &Path {
    &self.app_root
  }

  /// Load the package whose `package.json` lives in `root`
  pub fn get(&self, root: &Path) -> Result<Arc<Package>, PackageCacheError> {
    let root = self.fs.canonicalize(root)?;
    if let Some(package) = self.packages.read().get(&root) {
      return Ok(package.clone());
    }

    let path = root.join("package.json");
    let contents = self.fs.read_to_string(&path)?;
    let package_json = PackageJson::parse(path.clone(), &contents)
      .map_err(|err| PackageCacheError::Json(JsonError::new(path, err)))?;

    let package = Arc::new(Package {
      name: package_json.name.clone(),
      is_app: root == self.app_root,
      root: root.clone(),
      package_json: Arc::new(package_json),
    });

    tracing::trace!(name = %package.name, root = %root.display(), "Loaded package");

    Ok(
      self
        .packages
        .write()
        .entry(root)
        .or_insert(package)
        .clone(),
    )
  }

  fn find_package_root(&self, name: &str, from: &Package) -> Option<PathBuf> {
    from
      .root
      .ancestors()
      .filter(|dir| dir.file_name().map_or(true, |dir_name| dir_name != "node_modules"))
      .map(|dir| dir.join("node_modules").join(name))
      .find(|candidate| self.fs.is_file(&candidate.join("package.json")))
  }
}

impl PackageResolver for PackageCache {
  fn app_package(&self) -> Result<Arc<Package>, PackageCacheError> {
    self.get(&self.app_root)
  }

  fn resolve(&self, name: &str, from: &Package) -> Result<Arc<Package>, PackageCacheError> {
    if name == from.name {
      return self.get(&from.root);
    }

    let key = (from.root.clone(), name.to_string());
    if let Some(package) = self.resolutions.read().get(&key) {
      return Ok(package.clone());
    }

    let root = self
      .find_package_root(name, from)
      .ok_or_else(|| PackageCacheError::NotFound {
        name: name.to_string(),
        from: from.root.clone(),
      })?;

    let package = self.get(&root)?;
    self.resolutions.write().insert(key, package.clone());

    Ok(package)
  }

  fn dependencies(&self, package: &Package) -> Result<Vec<Arc<Package>>, PackageCacheError> {
    if let Some(dependencies) = self.dependencies.read().get(&package.root) {
      return Ok(dependencies.clone());
    }

    let package_json = &package.package_json;
    let mut names = package_json
      .dependencies
      .keys()
      .cloned()
      .collect::<IndexSet<String>>();

    if package.is_app {
      names.extend(package_json.dev_dependencies.keys().cloned());
    }

    let mut dependencies = Vec::with_capacity(names.len());
    for name in names {
      dependencies.push(self.resolve(&name, package)?);
    }

    for name in package_json.peer_dependencies.keys() {
      if dependencies.iter().any(|dependency| &dependency.name == name) {
        continue;
      }

      match self.resolve(name, package) {
        Ok(dependency) => dependencies.push(dependency),
        Err(err) if err.is_not_found() => {
          tracing::debug!(
            package = %package.name,
            peer = %name,
            "Skipping missing peer dependency"
          );
        }
        Err(err) => return Err(err),
      }
    }

    self
      .dependencies
      .write()
      .insert(package.root.clone(), dependencies.clone());

    Ok(dependencies)
  }
}
