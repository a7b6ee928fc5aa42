//! Tokenizer for kv source text

use crate::error::{ParseError, source_span};
use kv_span::Span;
use miette::NamedSource;
use std::iter::Peekable;
use std::str::CharIndices;

/// Token kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `=>`
    Arrow,
    /// `=`
    Equals,
    /// `;`
    Semicolon,
    /// Identifier
    Ident,
    /// Decimal integer literal
    Int,
    /// End of input
    Eof,
}

/// A token with its location
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    /// Kind of token
    pub kind: TokenKind,
    /// Source location
    pub span: Span,
}

impl Token {
    /// Source text covered by this token
    #[must_use]
    pub fn text<'src>(&self, source: &'src str) -> &'src str {
        &source[self.span.range()]
    }
}

/// Streaming lexer over a source string
pub struct Lexer<'src> {
    name: &'src str,
    source: &'src str,
    chars: Peekable<CharIndices<'src>>,
}

const fn is_ident_start(character: char) -> bool {
    character.is_ascii_alphabetic() || character == '_'
}

const fn is_ident_continue(character: char) -> bool {
    character.is_ascii_alphanumeric() || character == '_'
}

impl<'src> Lexer<'src> {
    /// Creates a lexer; `name` labels diagnostics
    #[must_use]
    pub fn new(name: &'src str, source: &'src str) -> Self {
        Self {
            name,
            source,
            chars: source.char_indices().peekable(),
        }
    }

    /// Tokenizes the whole input, ending with a single `Eof` token
    ///
    /// # Errors
    ///
    /// Returns the first lexical error
    pub fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            tokens.push(token);
            if token.kind == TokenKind::Eof {
                return Ok(tokens);
            }
        }
    }

    fn offset(&mut self) -> u32 {
        self.chars
            .peek()
            .map_or(self.source.len(), |&(offset, _)| offset) as u32
    }

    fn src(&self) -> NamedSource<String> {
        NamedSource::new(self.name, self.source.to_string())
    }

    fn eat_while(&mut self, predicate: impl Fn(char) -> bool) {
        while self.chars.next_if(|&(_, character)| predicate(character)).is_some() {}
    }

    fn skip_trivia(&mut self) {
        loop {
            self.eat_while(char::is_whitespace);
            let mut lookahead = self.chars.clone();
            let is_comment = matches!(lookahead.next(), Some((_, '/')))
                && matches!(lookahead.next(), Some((_, '/')));
            if !is_comment {
                return;
            }
            self.eat_while(|character| character != '\n');
        }
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        self.skip_trivia();

        let start = self.offset();
        let Some((_, character)) = self.chars.next() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                span: Span::point(start),
            });
        };

        let kind = match character {
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            '{' => TokenKind::LBrace,
            '}' => TokenKind::RBrace,
            ';' => TokenKind::Semicolon,
            '=' => {
                if self.chars.next_if(|&(_, next)| next == '>').is_some() {
                    TokenKind::Arrow
                } else {
                    TokenKind::Equals
                }
            }
            '0'..='9' => {
                self.eat_while(|next| next.is_ascii_digit());
                if self.chars.peek().is_some_and(|&(_, next)| is_ident_continue(next)) {
                    self.eat_while(is_ident_continue);
                    return Err(ParseError::InvalidSyntax {
                        construct: "integer literal".to_string(),
                        suggestion: Some("identifiers cannot start with a digit".to_string()),
                        span: source_span(Span::new(start, self.offset())),
                        src: self.src(),
                    });
                }
                TokenKind::Int
            }
            _ if is_ident_start(character) => {
                self.eat_while(is_ident_continue);
                TokenKind::Ident
            }
            _ => {
                return Err(ParseError::UnexpectedCharacter {
                    character,
                    span: source_span(Span::new(start, self.offset())),
                    src: self.src(),
                });
            }
        };

        Ok(Token {
            kind,
            span: Span::new(start, self.offset()),
        })
    }
}
