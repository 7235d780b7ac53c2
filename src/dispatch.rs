//! Argument validation, URL templating, and the signed dispatch of declared resources.

pub mod args;
pub mod dispatcher;
pub mod template;
pub mod validate;

pub use args::*;
pub use dispatcher::*;
pub use template::*;
pub use validate::*;
