//! Raw, untyped parse tree
//!
//! This is the shape every front end hands to the instantiator: nested records
//! tagged by a textual node kind. Nothing here is validated; the tag set is
//! only a convention shared with `kv-instantiate`.

use kv_span::Span;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind tags understood by the instantiator
pub mod kinds {
    /// Module (root of a parse)
    pub const MODULE: &str = "mod";
    /// Identifier
    pub const SYMBOL: &str = "sym";
    /// Integer literal
    pub const INTEGER: &str = "int";
    /// Lambda abstraction: `[body, params...]`
    pub const LAMBDA: &str = "abs";
    /// Application: `[callee, args...]`
    pub const APPLY: &str = "app";
    /// Block: `[exprs...]`
    pub const BLOCK: &str = "blk";
    /// Assignment: `[name, value]`
    pub const ASSIGN: &str = "let";
}

/// Generic raw syntax tree node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawNode {
    /// Textual kind tag
    pub kind: String,
    /// Source text for leaves (identifier name, literal digits)
    #[serde(default)]
    pub text: String,
    /// Source location
    #[serde(default)]
    pub span: Span,
    /// Child nodes
    #[serde(default)]
    pub children: Vec<RawNode>,
}

impl RawNode {
    /// Creates a node without children
    #[must_use]
    pub fn leaf(kind: &str, text: impl Into<String>, span: Span) -> Self {
        Self {
            kind: kind.to_string(),
            text: text.into(),
            span,
            children: Vec::new(),
        }
    }

    /// Creates an interior node
    #[must_use]
    pub fn branch(kind: &str, span: Span, children: Vec<Self>) -> Self {
        Self {
            kind: kind.to_string(),
            text: String::new(),
            span,
            children,
        }
    }

    /// Reads a raw tree from its JSON form
    ///
    /// # Errors
    ///
    /// Returns the deserializer error if `json` is not a raw tree
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Serializes this tree as JSON
    ///
    /// # Errors
    ///
    /// Propagates serializer failures
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// S-expression dump, e.g. `(app (sym a) (int 1))`
impl fmt::Display for RawNode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "({}", self.kind)?;
        if !self.text.is_empty() {
            write!(formatter, " {}", self.text)?;
        }
        for child in &self.children {
            write!(formatter, " {child}")?;
        }
        write!(formatter, ")")
    }
}
