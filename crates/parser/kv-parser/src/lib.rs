//! Parser for kv source text
//!
//! This crate turns source text into the untyped [`RawNode`] tree consumed by
//! `kv-instantiate`. Parsing stops at the first error; a failed parse yields no
//! tree at all.

pub mod error;
pub mod lexer;

pub use error::ParseError;

use error::source_span;
use kv_span::Span;
use kv_syntax::{RawNode, kinds};
use lexer::{Lexer, Token, TokenKind};
use miette::NamedSource;

/// Result of parsing a source file
#[derive(Debug, Clone)]
pub struct ParseResult {
    /// Converted syntax tree, absent if parsing failed
    pub syntax: Option<RawNode>,
    /// Parse errors with detailed diagnostics
    pub errors: Vec<ParseError>,
}

/// Parse kv source code
pub fn parse_source(source: &str) -> ParseResult {
    parse_named("<input>", source)
}

/// Parse kv source code, labelling diagnostics with `name`
pub fn parse_named(name: &str, source: &str) -> ParseResult {
    let result = Lexer::new(name, source)
        .tokenize()
        .and_then(|tokens| Parser::new(name, source, tokens).parse_module());

    match result {
        Ok(syntax) => ParseResult {
            syntax: Some(syntax),
            errors: Vec::new(),
        },
        Err(error) => ParseResult {
            syntax: None,
            errors: vec![error],
        },
    }
}

/// Recursive-descent parser over a token buffer
struct Parser<'src> {
    name: &'src str,
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
}

impl<'src> Parser<'src> {
    fn new(name: &'src str, source: &'src str, tokens: Vec<Token>) -> Self {
        Self {
            name,
            source,
            tokens,
            pos: 0,
        }
    }

    fn src(&self) -> NamedSource<String> {
        NamedSource::new(self.name, self.source.to_string())
    }

    // The token buffer always ends with `Eof`, and `bump` never moves past it.
    fn peek(&self) -> Token {
        self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn bump(&mut self) -> Token {
        let token = self.peek();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn skip_separators(&mut self) {
        while self.peek().kind == TokenKind::Semicolon {
            self.bump();
        }
    }

    fn parse_module(mut self) -> Result<RawNode, ParseError> {
        let mut exprs = Vec::new();
        loop {
            self.skip_separators();
            if self.peek().kind == TokenKind::Eof {
                break;
            }
            exprs.push(self.parse_expr()?);
        }

        let span = Span::new(0, self.source.len() as u32);
        Ok(RawNode::branch(kinds::MODULE, span, exprs))
    }

    fn parse_expr(&mut self) -> Result<RawNode, ParseError> {
        let token = self.peek();
        match token.kind {
            TokenKind::Int => {
                self.bump();
                Ok(RawNode::leaf(kinds::INTEGER, token.text(self.source), token.span))
            }
            TokenKind::Ident => {
                self.bump();
                let name = RawNode::leaf(kinds::SYMBOL, token.text(self.source), token.span);
                if self.peek().kind != TokenKind::Equals {
                    return Ok(name);
                }
                self.bump();
                let value = self.parse_expr()?;
                let span = token.span.cover(value.span);
                Ok(RawNode::branch(kinds::ASSIGN, span, vec![name, value]))
            }
            TokenKind::LParen => self.parse_group(),
            TokenKind::LBrace => self.parse_block(),
            TokenKind::Eof => Err(ParseError::MissingToken {
                expected: "an expression".to_string(),
                found: "end of file".to_string(),
                span: source_span(token.span),
                src: self.src(),
            }),
            TokenKind::RParen
            | TokenKind::RBrace
            | TokenKind::Arrow
            | TokenKind::Equals
            | TokenKind::Semicolon => Err(ParseError::UnexpectedToken {
                token: token.text(self.source).to_string(),
                span: source_span(token.span),
                src: self.src(),
            }),
        }
    }

    /// `( expr* )` optionally followed by `=> expr`
    fn parse_group(&mut self) -> Result<RawNode, ParseError> {
        let open = self.bump();
        let mut elements = Vec::new();
        let close = loop {
            match self.peek().kind {
                TokenKind::RParen => break self.bump(),
                TokenKind::Eof => return Err(self.unclosed(open, '(', ')')),
                _ => elements.push(self.parse_expr()?),
            }
        };

        if self.peek().kind == TokenKind::Arrow {
            self.bump();
            if let Some(bad) = elements.iter().find(|element| element.kind != kinds::SYMBOL) {
                return Err(ParseError::InvalidSyntax {
                    construct: "lambda parameter list".to_string(),
                    suggestion: Some("lambda parameters must be plain identifiers".to_string()),
                    span: source_span(bad.span),
                    src: self.src(),
                });
            }
            let body = self.parse_expr()?;
            let span = open.span.cover(body.span);
            let mut children = Vec::with_capacity(elements.len() + 1);
            children.push(body);
            children.extend(elements);
            return Ok(RawNode::branch(kinds::LAMBDA, span, children));
        }

        let span = open.span.cover(close.span);
        if elements.is_empty() {
            return Err(ParseError::InvalidSyntax {
                construct: "application".to_string(),
                suggestion: Some("an application needs a callee, e.g. `(f x)`".to_string()),
                span: source_span(span),
                src: self.src(),
            });
        }
        Ok(RawNode::branch(kinds::APPLY, span, elements))
    }

    /// `{ expr* }` with optional `;` separators
    fn parse_block(&mut self) -> Result<RawNode, ParseError> {
        let open = self.bump();
        let mut exprs = Vec::new();
        let close = loop {
            self.skip_separators();
            match self.peek().kind {
                TokenKind::RBrace => break self.bump(),
                TokenKind::Eof => return Err(self.unclosed(open, '{', '}')),
                _ => exprs.push(self.parse_expr()?),
            }
        };

        Ok(RawNode::branch(kinds::BLOCK, open.span.cover(close.span), exprs))
    }

    fn unclosed(&self, open: Token, opening_char: char, closing_char: char) -> ParseError {
        ParseError::UnclosedDelimiter {
            opening_char,
            closing_char,
            opening: source_span(open.span),
            expected_close: source_span(self.peek().span),
            src: self.src(),
        }
    }
}
