//! Package-resolution service used to walk runtime dependency graphs.
//!
//! A [`PackageCache`] reads and parses `package.json` files through a [`FileSystemRef`],
//! resolves package names the way node does (`node_modules` lookup through every
//! ancestor directory) and hands out one shared [`Package`] per package root.
//!
//! [`FileSystemRef`]: entrypack_filesystem::FileSystemRef
pub use cache::*;
pub use error::*;
pub use package::*;
pub use package_json::*;

mod cache;
mod error;
mod package;
mod package_json;
