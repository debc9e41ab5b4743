pub use version_transformer::*;

mod version_transformer;
