pub use self::asset::*;
pub use self::config::*;
pub use self::entrypoint::*;
pub use self::manifest::*;

mod asset;
mod config;
mod entrypoint;
mod manifest;
