pub use template_compiler::*;
pub use template_transformer::*;

mod template_compiler;
mod template_transformer;
