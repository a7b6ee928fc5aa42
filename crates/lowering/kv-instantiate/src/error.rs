//! Instantiation errors

use kv_ast::NodeKind;
use kv_span::Span;
use thiserror::Error;

/// Errors raised while turning a raw tree into an AST
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstantiateError {
    /// The kind tag is not one of the seven known node kinds
    #[error("don't know how to instantiate node kind `{kind}`")]
    UnsupportedNodeKind {
        /// The offending tag
        kind: String,
        /// Location of the raw node
        span: Span,
    },

    /// An integer node whose text is not a run of decimal digits
    #[error("malformed integer literal `{text}`")]
    MalformedInteger {
        /// Literal text as produced by the parser
        text: String,
        /// Location of the literal
        span: Span,
    },

    /// A node lacks the children its kind cannot be built without
    #[error("`{kind}` node has {found} children, expected {expected}")]
    MissingChild {
        /// Kind of the malformed node
        kind: NodeKind,
        /// Description of the expected child count
        expected: &'static str,
        /// Number of children present
        found: usize,
        /// Location of the raw node
        span: Span,
    },

    /// The root handed to [`crate::instantiate_module`] is not a module
    #[error("expected a `mod` root, found `{kind}`")]
    NotAModule {
        /// Tag of the root node
        kind: String,
    },
}
