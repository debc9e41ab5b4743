use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Error;
use async_trait::async_trait;
use entrypack_core::plugin::{PluginContext, TransformerPlugin, Transformation};
use entrypack_core::types::Asset;

use crate::{HbsToJs, TemplateCompiler};

/// Compiles every asset with the template extension into a module
#[derive(Debug)]
pub struct EntrypackTemplateTransformerPlugin {
  compiler: Arc<dyn TemplateCompiler>,
  extension: String,
  project_root: PathBuf,
}

impl EntrypackTemplateTransformerPlugin {
  pub fn new(ctx: &PluginContext) -> Self {
    Self::with_compiler(ctx, Arc::new(HbsToJs))
  }

  pub fn with_compiler(ctx: &PluginContext, compiler: Arc<dyn TemplateCompiler>) -> Self {
    EntrypackTemplateTransformerPlugin {
      compiler,
      extension: ctx.options.entrypack_config.template_extension.clone(),
      project_root: ctx.options.project_root.clone(),
    }
  }

  fn module_name(&self, asset: &Asset) -> String {
    asset
      .file_path
      .strip_prefix(&self.project_root)
      .unwrap_or(&asset.file_path)
      .to_string_lossy()
      .replace('\\', "/")
  }
}

#[async_trait]
impl TransformerPlugin for EntrypackTemplateTransformerPlugin {
  async fn transform(&self, asset: &Asset) -> Result<Transformation, Error> {
    if !asset.has_extension(&self.extension) {
      return Ok(Transformation::Skip);
    }

    let code = self.compiler.compile(&asset.code, &self.module_name(asset))?;

    Ok(Transformation::Transformed(Asset {
      file_path: asset.file_path.clone(),
      code,
    }))
  }
}

#[cfg(test)]
mod tests {
  use entrypack_core::config_loader::ConfigLoader;
  use entrypack_core::plugin::PluginOptions;
  use entrypack_filesystem::in_memory_file_system::InMemoryFileSystem;
  use pretty_assertions::assert_eq;

  use super::*;

  #[derive(Debug)]
  struct UppercaseCompiler;

  impl TemplateCompiler for UppercaseCompiler {
    fn compile(&self, template: &str, module_name: &str) -> Result<String, Error> {
      Ok(format!("// {module_name}\n{}", template.to_uppercase()))
    }
  }

  #[derive(Debug)]
  struct FailingCompiler;

  impl TemplateCompiler for FailingCompiler {
    fn compile(&self, _template: &str, _module_name: &str) -> Result<String, Error> {
      Err(anyhow::anyhow!("Unclosed element `p`"))
    }
  }

  fn plugin_context() -> PluginContext {
    let file_system = Arc::new(InMemoryFileSystem::default());

    PluginContext {
      config: Arc::new(ConfigLoader::new(
        file_system.clone(),
        PathBuf::from("/project"),
      )),
      file_system,
      options: Arc::new(PluginOptions {
        project_root: PathBuf::from("/project"),
        ..PluginOptions::default()
      }),
    }
  }

  #[tokio::test(flavor = "multi_thread")]
  async fn compiles_template_assets() {
    let plugin = EntrypackTemplateTransformerPlugin::with_compiler(
      &plugin_context(),
      Arc::new(UppercaseCompiler),
    );
    let asset = Asset::new(
      "/project/packages/@ember/-internals/glimmer/lib/templates/outlet.hbs",
      "{{outlet}}",
    );

    let transformation = plugin.transform(&asset).await.map_err(|e| e.to_string());

    assert_eq!(
      transformation,
      Ok(Transformation::Transformed(Asset::new(
        "/project/packages/@ember/-internals/glimmer/lib/templates/outlet.hbs",
        "// packages/@ember/-internals/glimmer/lib/templates/outlet.hbs\n{{OUTLET}}"
      )))
    );
  }

  #[tokio::test(flavor = "multi_thread")]
  async fn uses_hbs_to_js_by_default() {
    let plugin = EntrypackTemplateTransformerPlugin::new(&plugin_context());
    let asset = Asset::new("/project/packages/ember/templates/root.hbs", "{{outlet}}");

    let transformation = plugin.transform(&asset).await.map_err(|e| e.to_string());

    assert_eq!(
      transformation,
      Ok(Transformation::Transformed(Asset::new(
        "/project/packages/ember/templates/root.hbs",
        "import { hbs } from 'ember-cli-htmlbars';\nexport default hbs(\"{{outlet}}\", { moduleName: \"packages/ember/templates/root.hbs\" });\n"
      )))
    );
  }

  #[tokio::test(flavor = "multi_thread")]
  async fn skips_other_files() {
    let plugin = EntrypackTemplateTransformerPlugin::with_compiler(
      &plugin_context(),
      Arc::new(FailingCompiler),
    );

    for path in ["/project/packages/ember/index.ts", "/project/templates/hbs"] {
      let transformation = plugin
        .transform(&Asset::new(path, "{{outlet}}"))
        .await
        .map_err(|e| e.to_string());

      assert_eq!(transformation, Ok(Transformation::Skip));
    }
  }

  #[tokio::test(flavor = "multi_thread")]
  async fn propagates_compiler_errors() {
    let plugin = EntrypackTemplateTransformerPlugin::with_compiler(
      &plugin_context(),
      Arc::new(FailingCompiler),
    );

    let transformation = plugin
      .transform(&Asset::new("/project/a.hbs", "<p>"))
      .await
      .map_err(|e| e.to_string());

    assert_eq!(transformation, Err(String::from("Unclosed element `p`")));
  }
}
