//! Lowering errors

use kv_ast::NodeKind;
use kv_suggest::did_you_mean;
use thiserror::Error;

/// Errors raised while lowering an AST to C
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LowerError {
    /// Symbol not bound in the current function's renaming context
    #[error("unresolved symbol `{name}`{}", did_you_mean(.suggestions))]
    UnresolvedSymbol {
        /// The name that was not found
        name: String,
        /// Parameters of the current function with similar names
        suggestions: Vec<String>,
    },

    /// Node kind with no lowering rule
    #[error("cannot lower a `{kind}` node")]
    Unsupported {
        /// Kind of the node
        kind: NodeKind,
    },

    /// Lambda parameter that is not a symbol
    #[error("expected a symbol as lambda parameter, found `{found}`")]
    ExpectedSymbol {
        /// What was found instead
        found: NodeKind,
    },
}
