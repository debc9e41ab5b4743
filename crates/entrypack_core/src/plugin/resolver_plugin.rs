use std::fmt::Debug;
use std::path::PathBuf;

use async_trait::async_trait;

pub struct ResolveContext {
  /// The import specifier as written in source
  pub specifier: String,
  /// Absolute path of the importing module, if any
  pub importer: Option<PathBuf>,
}

impl ResolveContext {
  pub fn new(specifier: impl Into<String>, importer: Option<PathBuf>) -> Self {
    Self {
      specifier: specifier.into(),
      importer,
    }
  }

  /// Whether the specifier is relative to the importing module
  pub fn is_relative(&self) -> bool {
    self.specifier.starts_with("./") || self.specifier.starts_with("../")
  }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Resolution {
  /// Indicates the dependency was not resolved
  Unresolved,

  /// An absolute path to the resolved file
  Resolved(PathBuf),
}

/// Converts an import specifier into a file path
///
/// Resolvers run in a pipeline until one of them returns a result.
///
#[async_trait]
pub trait ResolverPlugin: Debug + Send + Sync {
  /// Determines what the import specifier resolves to
  async fn resolve(&self, ctx: &ResolveContext) -> Result<Resolution, anyhow::Error>;
}
