use serde::Deserialize;
use serde::Serialize;

/// A third-party package bundled through one explicit file inside it
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct VendoredDependency {
  pub name: String,
  /// Path of the bundled file, relative to the package root
  pub entry: String,
}

impl VendoredDependency {
  pub fn new(name: &str, entry: &str) -> Self {
    Self {
      name: name.to_string(),
      entry: entry.to_string(),
    }
  }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct OutputOptions {
  pub format: String,
  pub dir: String,
}

impl Default for OutputOptions {
  fn default() -> Self {
    Self {
      format: String::from("es"),
      dir: String::from("dist"),
    }
  }
}

/// Options read from `entrypack.json`
///
/// Every field is optional; defaults describe the framework source layout this tool was
/// written for.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntrypackConfig {
  /// Directory holding the framework's own packages, relative to the project root
  pub packages_dir: String,
  pub source_extensions: Vec<String>,
  /// Scope of internal packages that nest one level deeper than scoped packages
  pub internal_namespace: String,
  /// Packages left out of the source enumeration entirely
  pub excluded_packages: Vec<String>,
  /// Packages bundled through their root index module only
  pub rolled_up_packages: Vec<String>,
  pub vendored_dependencies: Vec<VendoredDependency>,
  /// Starting points of the runtime dependency walk
  pub dependency_roots: Vec<String>,
  /// Package name prefixes the dependency walk keeps
  pub namespace_filters: Vec<String>,
  /// Manifest field naming a package's distributable module
  pub entrypoint_field: String,
  pub output: OutputOptions,
  pub template_extension: String,
  /// Extension tried by the extension-less import resolver
  pub resolve_extension: String,
  /// File whose version placeholder is replaced, relative to the project root
  pub version_file: String,
  pub version_placeholder: String,
}

impl Default for EntrypackConfig {
  fn default() -> Self {
    let strings = |values: &[&str]| values.iter().map(|v| v.to_string()).collect::<Vec<_>>();

    Self {
      packages_dir: String::from("packages"),
      source_extensions: strings(&["ts", "js"]),
      internal_namespace: String::from("@ember/-internals"),
      excluded_packages: strings(&[
        "loader",
        "external-helpers",
        "ember-template-compiler",
        "internal-test-helpers",
      ]),
      rolled_up_packages: strings(&[
        "@ember/-internals/browser-environment",
        "@ember/-internals/environment",
        "@ember/-internals/glimmer",
        "@ember/-internals/metal",
        "@ember/-internals/utils",
        "@ember/-internals/container",
      ]),
      vendored_dependencies: vec![
        VendoredDependency::new("backburner.js", "dist/es6/backburner.js"),
        VendoredDependency::new("rsvp", "lib/rsvp.js"),
        VendoredDependency::new("dag-map", "dag-map.js"),
        VendoredDependency::new("router_js", "dist/modules/index.js"),
        VendoredDependency::new("route-recognizer", "dist/route-recognizer.es.js"),
      ],
      dependency_roots: strings(&[
        "@glimmer/node",
        "@simple-dom/document",
        "@glimmer/manager",
        "@glimmer/destroyable",
        "@glimmer/owner",
        "@glimmer/opcode-compiler",
        "@glimmer/runtime",
      ]),
      namespace_filters: strings(&["@glimmer/", "@simple-dom/"]),
      entrypoint_field: String::from("module"),
      output: OutputOptions::default(),
      template_extension: String::from("hbs"),
      resolve_extension: String::from("ts"),
      version_file: String::from("packages/ember/version.ts"),
      version_placeholder: String::from("VERSION_GOES_HERE"),
    }
  }
}
