use std::fmt::Debug;

/// Turns template source into the source of an ES module
pub trait TemplateCompiler: Debug + Send + Sync {
  fn compile(&self, template: &str, module_name: &str) -> Result<String, anyhow::Error>;
}

/// Wraps a template in a module that defers compilation to the runtime `hbs` tag
#[derive(Debug, Default)]
pub struct HbsToJs;

impl TemplateCompiler for HbsToJs {
  fn compile(&self, template: &str, module_name: &str) -> Result<String, anyhow::Error> {
    let template = serde_json::to_string(template)?;
    let module_name = serde_json::to_string(module_name)?;

    Ok(format!(
      "import {{ hbs }} from 'ember-cli-htmlbars';\nexport default hbs({template}, {{ moduleName: {module_name} }});\n"
    ))
  }
}
