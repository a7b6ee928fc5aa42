//! Pipeline errors

use kv_codegen::LowerError;
use kv_instantiate::InstantiateError;
use kv_parser::ParseError;
use kv_resolve::ResolveError;
use std::io;
use thiserror::Error;

/// Any failure that aborts a compilation
#[derive(Debug, Error)]
pub enum CompileError {
    /// The parser produced no tree
    #[error("syntax error in module `{module}`")]
    Syntax {
        /// Module being parsed
        module: String,
        /// Parser diagnostics
        errors: Vec<ParseError>,
    },

    /// A JSON raw tree could not be decoded
    #[error("malformed raw tree: {0}")]
    RawTree(#[from] serde_json::Error),

    /// Raw tree to AST conversion failed
    #[error(transparent)]
    Instantiate(#[from] InstantiateError),

    /// Name resolution failed
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// Lowering to C failed
    #[error(transparent)]
    Lower(#[from] LowerError),

    /// Reading the source or writing artifacts failed
    #[error(transparent)]
    Io(#[from] io::Error),
}
