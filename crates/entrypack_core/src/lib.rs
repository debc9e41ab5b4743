pub mod config_loader;
pub mod path;
pub mod plugin;
pub mod types;
