use super::{token::Token, LexicalError, LexicalErrorKind, LineBreaks, TokenKind};
use crate::report::Diagnostic;
use std::path::Path;

/// Interface for creating new token formatters.
pub trait TokenFormatter {
    /// Formats a token into a string.
    fn format(&self, token: &Token) -> String;
    /// Formats a lexer error into a string.
    fn format_error(&self, error: &LexicalError) -> String;
}

fn describe_token(token: &Token) -> String {
    let text = &token.text;
    match token.kind {
        TokenKind::LeftParenthesis | TokenKind::RightParenthesis => {
            format!("{} {text} null", token.kind)
        }
        TokenKind::Number => format!("NUMBER {text} {text}"),
        TokenKind::Identifier => format!("IDENTIFIER {text} null"),
        TokenKind::String => format!("STRING \"{text}\" {text}"),
    }
}

/// One line per token: kind, lexeme and literal value.
pub struct BasicFormatter {
    line_breaks: LineBreaks,
}

impl BasicFormatter {
    pub fn new(text: &str) -> Self {
        Self {
            line_breaks: LineBreaks::new(text),
        }
    }

    pub fn get_line_breaks(&self) -> &LineBreaks {
        &self.line_breaks
    }
}

impl TokenFormatter for BasicFormatter {
    fn format(&self, token: &Token) -> String {
        describe_token(token)
    }

    fn format_error(&self, error: &LexicalError) -> String {
        let line = self.line_breaks.get_line_from_span(error.span);
        format!("[line {line}] Error: {}.", error.kind)
    }
}

pub struct DebugFormatter;

impl TokenFormatter for DebugFormatter {
    fn format(&self, token: &Token) -> String {
        format!("{token:?}")
    }

    fn format_error(&self, error: &LexicalError) -> String {
        format!("{error:?}")
    }
}

/// Renders lexical errors as annotated source reports.
pub struct PrettyFormatter<'src> {
    text: &'src str,
    path: &'src Path,
}

impl<'src> PrettyFormatter<'src> {
    pub fn new(text: &'src str, path: &'src Path) -> Self {
        Self { text, path }
    }

    pub fn get_text(&self) -> &'src str {
        self.text
    }

    pub fn get_path(&self) -> &'src Path {
        self.path
    }
}

impl TokenFormatter for PrettyFormatter<'_> {
    fn format(&self, token: &Token) -> String {
        describe_token(token)
    }

    fn format_error(&self, error: &LexicalError) -> String {
        let path = self.path.to_string_lossy();
        let diagnostic = match error.kind {
            LexicalErrorKind::UnterminatedString => Diagnostic {
                code: error.code(),
                message: "Unterminated string literal",
                span: error.span,
                label: "This string is never closed".into(),
            },
        };
        diagnostic.render(&path, self.text)
    }
}
