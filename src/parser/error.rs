use crate::lexer::{LexicalError, Span, Token, TokenKind};
use compact_str::CompactString;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParserErrorKind {
    #[error("Expected {expected} but got {actual} `{text}`")]
    UnexpectedToken {
        actual: TokenKind,
        text: CompactString,
        expected: TokenKind,
    },
    #[error("Unknown operator `{0}`")]
    UnknownOperator(CompactString),
    #[error("Unexpected end of input")]
    UnexpectedEof,
    #[error("Integer literal `{0}` is out of range")]
    InvalidInteger(CompactString),
    #[error("Forms nested deeper than {0} levels")]
    NestingTooDeep(usize),
    #[error("{0}")]
    LexicalError(#[from] LexicalError),
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind}")]
pub struct ParserError {
    #[source]
    pub kind: ParserErrorKind,
    pub span: Span,
}

impl ParserError {
    pub(super) fn unexpected(token: Token, expected: TokenKind) -> Self {
        Self {
            kind: ParserErrorKind::UnexpectedToken {
                actual: token.kind,
                text: token.text,
                expected,
            },
            span: token.span,
        }
    }

    pub fn code(&self) -> &'static str {
        match self.kind {
            ParserErrorKind::UnexpectedToken { .. } => "PA001",
            ParserErrorKind::UnknownOperator(_) => "PA002",
            ParserErrorKind::UnexpectedEof => "PA003",
            ParserErrorKind::InvalidInteger(_) => "PA004",
            ParserErrorKind::NestingTooDeep(_) => "PA005",
            ParserErrorKind::LexicalError(ref error) => error.code(),
        }
    }
}

impl From<LexicalError> for ParserError {
    fn from(error: LexicalError) -> Self {
        Self {
            span: error.span,
            kind: ParserErrorKind::LexicalError(error),
        }
    }
}
