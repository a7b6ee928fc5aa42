//! Error types for name resolution

use kv_ast::NodeKind;
use kv_suggest::did_you_mean;

/// Errors that occur during name resolution
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    /// Symbol is not bound in any visible scope
    #[error("unresolved symbol `{name}`{}", did_you_mean(.suggestions))]
    Unresolved {
        /// The name that was not found
        name: String,
        /// Similar visible names, closest first
        suggestions: Vec<String>,
    },

    /// A binding position holds something other than a symbol
    #[error("expected a symbol as {context}, found `{found}`")]
    ExpectedSymbol {
        /// What was found instead
        found: NodeKind,
        /// Which binding position, e.g. "lambda parameter"
        context: &'static str,
    },
}
