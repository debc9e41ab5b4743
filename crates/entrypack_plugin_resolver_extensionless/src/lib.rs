pub use extensionless_resolver::*;

mod extensionless_resolver;
