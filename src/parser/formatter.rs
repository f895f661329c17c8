use super::{Node, NodeKind, ParserError, ParserErrorKind, Program};
use crate::lexer::formatter::{PrettyFormatter as PrettyTokenFormatter, TokenFormatter};
use crate::lexer::LineBreaks;
use crate::report::Diagnostic;
use ariadne::{Color, Fmt};
use std::fmt::Write;
use std::path::Path;

const WRITE_FMT_MSG: &str = "Encountered an error while attempting to write format string to buffer.";

pub trait ProgramFormatter {
    fn format(&self, program: &Program) -> String;
}

pub struct DebugProgramFormatter;

impl ProgramFormatter for DebugProgramFormatter {
    fn format(&self, program: &Program) -> String {
        format!("{program:#?}")
    }
}

/// Draws the syntax tree with branch glyphs, one node per line.
///
/// ```text
/// \--+ SEQ
///     \--+ PRINT
///         \--+ ADD
///             |-- 1
///             \-- x
/// ```
///
/// Operator nodes are marked with `+`, string literals are quoted.
pub struct TreeFormatter {
    colored: bool,
}

impl TreeFormatter {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    fn paint(&self, color: Color) -> Option<Color> {
        self.colored.then_some(color)
    }

    fn format_node(&self, buffer: &mut String, node: &Node, prefix: &str, is_last: bool) {
        let branch = if is_last { "\\--" } else { "|--" };
        let glyph = format!("{prefix}{branch}").fg(self.paint(Color::Cyan));
        let written = match node.kind {
            NodeKind::Operator { operator, .. } => writeln!(
                buffer,
                "{glyph}{} {}",
                "+".fg(self.paint(Color::Cyan)),
                operator.name().fg(self.paint(Color::Blue))
            ),
            NodeKind::IntLiteral(value) => {
                writeln!(buffer, "{glyph} {}", value.fg(self.paint(Color::Green)))
            }
            NodeKind::Variable(ref name) => {
                writeln!(buffer, "{glyph} {}", name.fg(self.paint(Color::Yellow)))
            }
            NodeKind::StringLiteral(ref value) => writeln!(
                buffer,
                "{glyph} {}",
                format!("\"{value}\"").fg(self.paint(Color::Magenta))
            ),
        };
        written.expect(WRITE_FMT_MSG);

        let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "|   " });
        let children = node.children();
        for (index, child) in children.iter().enumerate() {
            self.format_node(buffer, child, &child_prefix, index + 1 == children.len());
        }
    }
}

impl ProgramFormatter for TreeFormatter {
    fn format(&self, program: &Program) -> String {
        let mut buffer = String::new();
        self.format_node(&mut buffer, program.get_root(), "", true);
        buffer
    }
}

/// Prints each top-level form as a canonical S-expression on its own line.
///
/// The output parses back into a tree with the same shape.
pub struct SExpressionFormatter;

impl SExpressionFormatter {
    fn format_node(buffer: &mut String, node: &Node) {
        match node.kind {
            NodeKind::Operator {
                operator,
                ref children,
            } => {
                buffer.push('(');
                buffer.push_str(operator.symbol());
                for child in children.iter() {
                    buffer.push(' ');
                    Self::format_node(buffer, child);
                }
                buffer.push(')');
            }
            NodeKind::IntLiteral(value) => write!(buffer, "{value}").expect(WRITE_FMT_MSG),
            NodeKind::Variable(ref name) => buffer.push_str(name),
            NodeKind::StringLiteral(ref value) => {
                write!(buffer, "\"{value}\"").expect(WRITE_FMT_MSG)
            }
        }
    }
}

impl ProgramFormatter for SExpressionFormatter {
    fn format(&self, program: &Program) -> String {
        let mut buffer = String::new();
        for form in program.forms() {
            Self::format_node(&mut buffer, form);
            buffer.push('\n');
        }
        buffer
    }
}

pub trait ParserFormatter {
    fn format_error(&self, error: &ParserError) -> String;
}

pub struct DebugParserFormatter;

impl ParserFormatter for DebugParserFormatter {
    fn format_error(&self, error: &ParserError) -> String {
        format!("{error:?}")
    }
}

pub struct BasicParserFormatter {
    line_breaks: LineBreaks,
}

impl BasicParserFormatter {
    pub fn new(text: &str) -> Self {
        Self {
            line_breaks: LineBreaks::new(text),
        }
    }
}

impl ParserFormatter for BasicParserFormatter {
    fn format_error(&self, error: &ParserError) -> String {
        let line = self.line_breaks.get_line_from_span(error.span);
        format!("[line {line}] Error: {}.", error.kind)
    }
}

pub struct PrettyParserFormatter<'src> {
    token_formatter: PrettyTokenFormatter<'src>,
}

impl<'src> PrettyParserFormatter<'src> {
    pub fn new(text: &'src str, path: &'src Path) -> Self {
        Self {
            token_formatter: PrettyTokenFormatter::new(text, path),
        }
    }
}

impl ParserFormatter for PrettyParserFormatter<'_> {
    fn format_error(&self, error: &ParserError) -> String {
        let text = self.token_formatter.get_text();
        let path = self.token_formatter.get_path().to_string_lossy();
        let diagnostic = match error.kind {
            ParserErrorKind::UnexpectedToken {
                actual,
                ref text,
                expected,
            } => Diagnostic {
                code: error.code(),
                message: "Expected a different token",
                span: error.span,
                label: format!(
                    "Expected {} but got {} `{}`",
                    expected.fg(Color::BrightCyan),
                    actual.fg(Color::BrightRed),
                    text
                ),
            },
            ParserErrorKind::UnknownOperator(ref name) => Diagnostic {
                code: error.code(),
                message: "Unknown operator",
                span: error.span,
                label: format!("`{}` is not a recognised operator", name.fg(Color::BrightRed)),
            },
            ParserErrorKind::UnexpectedEof => Diagnostic {
                code: error.code(),
                message: "Unexpected end of input",
                span: error.span,
                label: "Input ends here, expected `)`".into(),
            },
            ParserErrorKind::InvalidInteger(ref literal) => Diagnostic {
                code: error.code(),
                message: "Integer literal out of range",
                span: error.span,
                label: format!(
                    "`{}` does not fit in a 64-bit signed integer",
                    literal.fg(Color::BrightRed)
                ),
            },
            ParserErrorKind::NestingTooDeep(limit) => Diagnostic {
                code: error.code(),
                message: "Forms nested too deeply",
                span: error.span,
                label: format!(
                    "This form is nested more than {} levels deep",
                    limit.fg(Color::BrightRed)
                ),
            },
            ParserErrorKind::LexicalError(ref error) => {
                return self.token_formatter.format_error(error);
            }
        };
        diagnostic.render(&path, text)
    }
}
