use crate::interpreter::error::RuntimeError;
use crate::lexer::LexicalError;
use crate::parser::{ParserError, ParserErrorKind};
use thiserror::Error;

/// Any error produced while running a program, tagged by the phase that raised it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LispError {
    #[error(transparent)]
    Lexical(#[from] LexicalError),
    #[error(transparent)]
    Parser(ParserError),
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl From<ParserError> for LispError {
    fn from(error: ParserError) -> Self {
        match error.kind {
            ParserErrorKind::LexicalError(inner) => LispError::Lexical(inner),
            _ => LispError::Parser(error),
        }
    }
}

impl LispError {
    pub fn code(&self) -> &'static str {
        match self {
            LispError::Lexical(error) => error.code(),
            LispError::Parser(error) => error.code(),
            LispError::Runtime(error) => error.code(),
        }
    }

    /// Process exit status: 65 for malformed input, 70 for runtime failures.
    pub fn exit_code(&self) -> u8 {
        match self {
            LispError::Lexical(_) | LispError::Parser(_) => 65,
            LispError::Runtime(_) => 70,
        }
    }
}
