use std::path::Path;
use std::path::PathBuf;

use entrypack_core::types::{BundleManifest, EntrypackConfig};
use entrypack_filesystem::FileSystem;
use glob_match::glob_match;

/// Glob patterns describing which source files become bundle entries
#[derive(Debug, PartialEq)]
pub struct SourceGlobs {
  pub include: String,
  pub ignore: Vec<String>,
  /// Files added back after `ignore` has been applied
  pub rolled_up: Vec<String>,
}

impl SourceGlobs {
  pub fn new(config: &EntrypackConfig) -> Self {
    let dir = config.packages_dir.trim_end_matches('/');
    let extensions = config.source_extensions.join(",");
    let internal = &config.internal_namespace;

    let mut ignore = vec![
      String::from("**/*.d.ts"),
      String::from("**/node_modules/**"),
    ];

    ignore.extend(
      config
        .excluded_packages
        .iter()
        .chain(&config.rolled_up_packages)
        .map(|name| format!("{dir}/{name}/**")),
    );

    for tests_dir in ["tests", "type-tests"] {
      ignore.push(format!("{dir}/{internal}/*/{tests_dir}/**"));
      ignore.push(format!("{dir}/*/*/{tests_dir}/**"));
      ignore.push(format!("{dir}/*/{tests_dir}/**"));
    }

    let rolled_up = config
      .rolled_up_packages
      .iter()
      .map(|name| format!("{dir}/{name}/index.{{{extensions}}}"))
      .collect();

    SourceGlobs {
      include: format!("{dir}/**/*.{{{extensions}}}"),
      ignore,
      rolled_up,
    }
  }

  fn is_entry(&self, path: &str) -> bool {
    glob_match(&self.include, path) && !self.ignore.iter().any(|glob| glob_match(glob, path))
  }

  fn is_rolled_up_entry(&self, path: &str) -> bool {
    self.rolled_up.iter().any(|glob| glob_match(glob, path))
  }
}

/// Every source module under the packages directory, keyed by its path without extension
///
/// Keys and values are relative to `project_root` and use `/` separators. Module files are
/// listed in path order, followed by the index modules of rolled-up packages.
#[tracing::instrument(level = "info", skip_all, fields(project_root = %project_root.display()))]
pub fn package_entrypoints(
  fs: &dyn FileSystem,
  project_root: &Path,
  config: &EntrypackConfig,
) -> std::io::Result<BundleManifest> {
  let globs = SourceGlobs::new(config);

  let mut files = Vec::new();
  let packages_dir = project_root.join(&config.packages_dir);
  if fs.is_dir(&packages_dir) {
    collect_files(fs, &packages_dir, &mut files)?;
  }

  let relative_files = files
    .iter()
    .filter_map(|file| relative_path(project_root, file))
    .collect::<Vec<String>>();

  let entry_files = relative_files
    .iter()
    .filter(|file| globs.is_entry(file))
    .chain(
      relative_files
        .iter()
        .filter(|file| globs.is_rolled_up_entry(file)),
    );

  let manifest = entry_files
    .map(|file| {
      (
        strip_source_extension(file, &config.source_extensions).to_string(),
        PathBuf::from(file),
      )
    })
    .collect::<BundleManifest>();

  tracing::debug!(entries = manifest.len(), "Enumerated package entrypoints");

  Ok(manifest)
}

/// Dot files and directories are skipped, as are symlinked directories.
fn collect_files(fs: &dyn FileSystem, dir: &Path, files: &mut Vec<PathBuf>) -> std::io::Result<()> {
  for entry in fs.read_dir(dir)? {
    let Some(name) = entry.file_name() else {
      continue;
    };

    if name.to_string_lossy().starts_with('.') {
      continue;
    }

    if fs.is_dir(&entry) {
      if name == "node_modules" || fs.is_symlink(&entry) {
        continue;
      }
      collect_files(fs, &entry, files)?;
    } else if fs.is_file(&entry) {
      files.push(entry);
    }
  }
  Ok(())
}

fn relative_path(root: &Path, file: &Path) -> Option<String> {
  let relative = file.strip_prefix(root).ok()?;
  let parts = relative
    .components()
    .map(|component| component.as_os_str().to_string_lossy())
    .collect::<Vec<_>>();
  Some(parts.join("/"))
}

fn strip_source_extension<'a>(file: &'a str, extensions: &[String]) -> &'a str {
  extensions
    .iter()
    .find_map(|extension| {
      file
        .strip_suffix(extension.as_str())
        .and_then(|stem| stem.strip_suffix('.'))
    })
    .unwrap_or(file)
}
