pub use error::*;
pub use manifest::*;
pub use project::*;

pub mod dependencies;
mod error;
pub mod manifest;
pub mod packages;
pub mod pipeline;
mod project;
