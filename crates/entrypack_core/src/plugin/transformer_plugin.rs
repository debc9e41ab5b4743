use std::fmt::Debug;

use async_trait::async_trait;

use crate::types::Asset;

#[derive(Debug, PartialEq)]
pub enum Transformation {
  /// The plugin does not apply to this asset
  Skip,
  Transformed(Asset),
}

/// Rewrites a single asset before it is handed to the bundler
///
/// Transformers are stateless with respect to the assets they see; each call depends only on
/// its input and on what the plugin captured when it was constructed.
#[async_trait]
pub trait TransformerPlugin: Debug + Send + Sync {
  async fn transform(&self, asset: &Asset) -> Result<Transformation, anyhow::Error>;
}
