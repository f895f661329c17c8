use super::error::{RuntimeError, RuntimeErrorKind};
use super::Value;
use crate::lexer::LineBreaks;
use crate::report::Diagnostic;
use ariadne::{Color, Fmt};
use std::path::Path;

pub trait ValueFormatter {
    fn format(&self, value: &Value) -> String;
    fn format_error(&self, error: &RuntimeError) -> String;
}

pub struct DebugFormatter;

impl ValueFormatter for DebugFormatter {
    fn format(&self, value: &Value) -> String {
        format!("{value:?}")
    }

    fn format_error(&self, error: &RuntimeError) -> String {
        format!("{error:?}")
    }
}

pub struct BasicFormatter {
    line_breaks: LineBreaks,
}

impl BasicFormatter {
    pub fn new(text: &str) -> Self {
        let line_breaks = LineBreaks::new(text);
        Self { line_breaks }
    }
}

impl ValueFormatter for BasicFormatter {
    fn format(&self, value: &Value) -> String {
        format!("{value}")
    }

    fn format_error(&self, error: &RuntimeError) -> String {
        let line = self.line_breaks.get_line_from_span(error.span);
        format!("[line {line}] Runtime error: {}.", error.kind)
    }
}

pub struct PrettyFormatter<'src> {
    text: &'src str,
    path: &'src Path,
}

impl<'src> PrettyFormatter<'src> {
    pub fn new(text: &'src str, path: &'src Path) -> Self {
        Self { text, path }
    }
}

impl ValueFormatter for PrettyFormatter<'_> {
    fn format(&self, value: &Value) -> String {
        format!("{value}")
    }

    fn format_error(&self, error: &RuntimeError) -> String {
        let path = self.path.to_string_lossy();
        let (message, label) = match error.kind {
            RuntimeErrorKind::UndefinedVariable(ref name) => (
                "Attempted to access a variable that has not been defined",
                format!("{} has not been defined yet.", name.fg(Color::BrightRed)),
            ),
            RuntimeErrorKind::InvalidArgumentCount {
                operator,
                expected,
                actual,
            } => (
                "Called an operator with the wrong number of arguments",
                format!(
                    "`{}` takes {} but got {}.",
                    operator.fg(Color::BrightYellow),
                    expected.fg(Color::BrightCyan),
                    actual.fg(Color::BrightRed),
                ),
            ),
            RuntimeErrorKind::TypeMismatch {
                operator,
                expected,
                actual,
            } => (
                "Operand has the wrong type",
                format!(
                    "`{}` expected {} but got {}.",
                    operator.fg(Color::BrightYellow),
                    expected.fg(Color::BrightCyan),
                    actual.fg(Color::BrightRed),
                ),
            ),
            RuntimeErrorKind::DivisionByZero => (
                "Attempted to divide by zero",
                "This divisor evaluates to zero.".into(),
            ),
            RuntimeErrorKind::IntegerOverflow(operator) => (
                "Integer overflow",
                format!(
                    "The result of `{}` does not fit in a 64-bit signed integer.",
                    operator.fg(Color::BrightYellow)
                ),
            ),
            RuntimeErrorKind::Unimplemented(operator) => (
                "Operator is not implemented",
                format!("`{}` cannot be evaluated.", operator.fg(Color::BrightRed)),
            ),
        };
        Diagnostic {
            code: error.code(),
            message,
            span: error.span,
            label,
        }
        .render(&path, self.text)
    }
}
