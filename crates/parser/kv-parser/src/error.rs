//! Rich error reporting for the parser
//!
//! Note: These struct fields are used by miette's `#[derive(Diagnostic)]` macro
//! for rich error output, but rustc cannot see through the proc macro expansion.

#![allow(unused_assignments, reason = "fields are read by the miette derive")]

use kv_span::Span;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Parse error with rich diagnostic information
#[derive(Error, Debug, Clone, Diagnostic)]
pub enum ParseError {
    /// A character no token starts with
    #[error("unexpected character `{character}`")]
    #[diagnostic(code(parser::unexpected_character))]
    UnexpectedCharacter {
        /// The offending character
        character: char,
        /// Source location
        #[label("not valid here")]
        span: SourceSpan,
        /// Source code for context
        #[source_code]
        src: NamedSource<String>,
    },

    /// A token that cannot start or continue the current construct
    #[error("unexpected token `{token}`")]
    #[diagnostic(code(parser::unexpected_token), help("this token is not valid here"))]
    UnexpectedToken {
        /// What was found
        token: String,
        /// Source location
        #[label("unexpected token")]
        span: SourceSpan,
        /// Source code for context
        #[source_code]
        src: NamedSource<String>,
    },

    /// Missing expected token
    #[error("expected {expected}, found {found}")]
    #[diagnostic(code(parser::missing_token))]
    MissingToken {
        /// What was expected
        expected: String,
        /// What was actually found
        found: String,
        /// Source location where it should be
        #[label("expected {expected} here")]
        span: SourceSpan,
        /// Source code for context
        #[source_code]
        src: NamedSource<String>,
    },

    /// Unclosed delimiter
    #[error("this file contains an unclosed delimiter")]
    #[diagnostic(code(parser::unclosed_delimiter), help("add a closing `{closing_char}`"))]
    UnclosedDelimiter {
        /// The opening character
        opening_char: char,
        /// The expected closing character
        closing_char: char,
        /// Opening delimiter location
        #[label("unclosed delimiter")]
        opening: SourceSpan,
        /// Location where closing was expected
        #[label]
        expected_close: SourceSpan,
        /// Source code for context
        #[source_code]
        src: NamedSource<String>,
    },

    /// Invalid syntax construct
    #[error("invalid {construct}")]
    #[diagnostic(code(parser::invalid_syntax))]
    InvalidSyntax {
        /// Type of construct (e.g., "lambda parameter list")
        construct: String,
        /// Detailed explanation
        #[help]
        suggestion: Option<String>,
        /// Source location
        #[label("{construct} is invalid")]
        span: SourceSpan,
        /// Source code for context
        #[source_code]
        src: NamedSource<String>,
    },
}

impl ParseError {
    /// Byte range the primary label points at
    #[must_use]
    pub fn span(&self) -> SourceSpan {
        match self {
            Self::UnexpectedCharacter { span, .. }
            | Self::UnexpectedToken { span, .. }
            | Self::MissingToken { span, .. }
            | Self::InvalidSyntax { span, .. } => *span,
            Self::UnclosedDelimiter { opening, .. } => *opening,
        }
    }
}

/// Converts a source span into miette's representation
pub(crate) fn source_span(span: Span) -> SourceSpan {
    (span.start as usize, span.len() as usize).into()
}
