use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Deserialize;

/// The subset of a `package.json` manifest the dependency walk relies on
///
/// Any other top-level field is kept in `fields` so that arbitrary entry fields can be
/// looked up by name.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageJson {
  #[serde(skip)]
  pub path: PathBuf,
  #[serde(default)]
  pub name: String,
  pub version: Option<String>,
  pub module: Option<String>,
  pub main: Option<String>,
  #[serde(default)]
  pub dependencies: IndexMap<String, String>,
  #[serde(default)]
  pub dev_dependencies: IndexMap<String, String>,
  #[serde(default)]
  pub peer_dependencies: IndexMap<String, String>,
  #[serde(flatten)]
  pub fields: serde_json::Map<String, serde_json::Value>,
}

impl PackageJson {
  pub fn parse(path: PathBuf, data: &str) -> serde_json::Result<PackageJson> {
    let mut parsed: PackageJson = serde_json::from_str(data)?;
    parsed.path = path;
    Ok(parsed)
  }

  /// Look up a string-valued entry field such as `module` or `main`
  ///
  /// Empty strings count as absent.
  pub fn entry_field(&self, field: &str) -> Option<&str> {
    let value = match field {
      "module" => self.module.as_deref(),
      "main" => self.main.as_deref(),
      other => self.fields.get(other).and_then(|value| value.as_str()),
    };

    value.filter(|value| !value.is_empty())
  }
}
