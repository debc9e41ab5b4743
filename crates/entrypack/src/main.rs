use std::path::PathBuf;
use std::sync::Arc;

use anyhow::anyhow;
use clap::{Parser, Subcommand};
use entrypack::pipeline::Pipeline;
use entrypack::{build_bundle_input, Project};
use entrypack_core::plugin::{Resolution, ResolveContext};
use entrypack_core::types::Asset;
use entrypack_filesystem::os_file_system::OsFileSystem;
use entrypack_filesystem::FileSystemRef;
use entrypack_monitoring::{MonitoringOptions, TracerMode};
use tracing::error;

#[derive(Parser)]
#[command(version, about)]
struct Args {
  /// Root of the framework checkout
  #[arg(short, long, global = true, default_value = ".")]
  project_root: PathBuf,

  /// Config file to use instead of `entrypack.json` in the project root
  #[arg(short, long, global = true)]
  config: Option<PathBuf>,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Print the bundler input manifest as JSON
  Manifest {
    /// Write the manifest to this file instead of stdout
    #[arg(short, long)]
    out: Option<PathBuf>,
  },
  /// Print a source file after it has been through the transformers
  Transform { file: PathBuf },
  /// Print the file an import specifier resolves to
  Resolve {
    specifier: String,

    /// The importing module
    #[arg(long)]
    from: PathBuf,
  },
}

#[tokio::main]
async fn main() {
  initialize_tracing();

  let args = Args::parse();
  let result = run(args).await;

  entrypack_monitoring::close_monitoring();

  if let Err(e) = result {
    error!("Failed to run entrypack: {:#}", e);
    std::process::exit(1);
  }
}

async fn run(args: Args) -> anyhow::Result<()> {
  let fs: FileSystemRef = Arc::new(OsFileSystem);
  let project = Project::load(fs, &args.project_root, args.config.as_deref())?;

  match args.command {
    Command::Manifest { out } => {
      let bundle_input = build_bundle_input(&project)?;
      let json = serde_json::to_string_pretty(&bundle_input)?;

      match out {
        Some(out) => std::fs::write(out, json + "\n")?,
        None => println!("{json}"),
      }
    }
    Command::Transform { file } => {
      let pipeline = Pipeline::new(&project)?;
      let file_path = project.canonical_path(&file)?;
      let asset = Asset::from_file(&*project.fs, &file_path)?;

      print!("{}", pipeline.transform(asset).await?.code);
    }
    Command::Resolve { specifier, from } => {
      let pipeline = Pipeline::new(&project)?;
      let importer = project.canonical_path(&from)?;

      match pipeline
        .resolve(&ResolveContext::new(specifier.as_str(), Some(importer)))
        .await?
      {
        Resolution::Resolved(path) => println!("{}", path.display()),
        Resolution::Unresolved => return Err(anyhow!("Unable to resolve '{specifier}'")),
      }
    }
  }

  Ok(())
}

fn initialize_tracing() {
  let mut options = match MonitoringOptions::from_env() {
    Ok(options) => options,
    Err(err) => {
      eprintln!("{err}");
      MonitoringOptions::default()
    }
  };

  if options.tracing_options.is_empty() {
    options.tracing_options.push(TracerMode::Stderr);
  }

  if let Err(err) = entrypack_monitoring::initialize_monitoring(options) {
    eprintln!("Failed to initialize tracing: {err}");
  }
}
