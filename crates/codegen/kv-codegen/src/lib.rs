//! C code generation for kv
//!
//! [`lower_module`] turns a module into a [`CompilationUnit`] of lifted
//! functions, which [`CompilationUnit::emit`] renders as a header and source
//! file pair.

pub mod config;
pub mod context;
pub mod error;
pub mod lower;
pub mod unit;

pub use config::CodegenConfig;
pub use context::RenamingContext;
pub use error::LowerError;
pub use lower::{Lowerer, lower_module};
pub use unit::{Artifacts, CompilationUnit, EmittedUnit, header_guard};
