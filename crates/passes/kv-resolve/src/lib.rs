//! Name resolution for kv
//!
//! This crate provides the lexical side of the compiler: a chain of scope
//! frames, a scope-aware generic traversal over the AST, and a resolution pass
//! built on that traversal.
//!
//! # Architecture
//!
//! - **Scope chain**: frames pushed and popped in LIFO order on top of an
//!   immutable core scope of built-ins
//! - **Traversal**: a bottom-up walk generic over the caller's result type
//! - **Resolver**: resolves every symbol and reports lambda captures
//!
//! # Usage
//!
//! ```rust,ignore
//! use kv_resolve::{CoreScope, resolve_module};
//!
//! let core = CoreScope::new();
//! let result = resolve_module(&module, &core)?;
//! ```

pub mod error;
pub mod resolver;
pub mod scope;
pub mod traverse;

pub use error::ResolveError;
pub use resolver::{Resolution, ResolutionResult, resolve_module};
pub use scope::{Binding, CoreScope, FrameId, FrameKind, ScopeChain};
pub use traverse::{traverse, traverse_module};
