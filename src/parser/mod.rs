mod error;
pub mod formatter;
mod node;

use crate::lexer::{Lexer, Span, Token, TokenKind};
pub use error::{ParserError, ParserErrorKind};
pub use node::{IdentName, Node, NodeKind, Operator, Program, OPERATOR_HASHMAP};

/// Recursive-descent parser for the grammar
///
/// ```text
/// program  := form*
/// form     := "(" IDENTIFIER argument* ")"
/// argument := form | NUMBER | IDENTIFIER | STRING
/// ```
///
/// Top-level forms are collected under an implicit `seq` node. Arity and
/// operand types are left for the interpreter to check. Forms may nest at most
/// [`MAX_NESTING_DEPTH`] levels deep.
pub struct Parser<'src> {
    lexer: Lexer<'src>,
    depth: usize,
}

pub const MAX_NESTING_DEPTH: usize = 256;

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            lexer: Lexer::new(source),
            depth: 0,
        }
    }

    fn next_token(&mut self) -> Result<Option<Token>, ParserError> {
        Ok(self.lexer.next_token()?)
    }

    fn expect_token(&mut self) -> Result<Token, ParserError> {
        self.next_token()?.ok_or_else(|| ParserError {
            kind: ParserErrorKind::UnexpectedEof,
            span: self.end_of_input(),
        })
    }

    fn end_of_input(&self) -> Span {
        Span::new(self.lexer.get_source().len(), 0)
    }
}

impl<'src> Parser<'src> {
    pub fn parse(&mut self) -> Result<Program, ParserError> {
        let mut forms = Vec::new();
        while let Some(token) = self.next_token()? {
            match token.kind {
                TokenKind::LeftParenthesis => forms.push(self.parse_form(token)?),
                _ => return Err(ParserError::unexpected(token, TokenKind::LeftParenthesis)),
            }
        }
        tracing::debug!(forms = forms.len(), "parsed program");

        let span = Span::new(0, self.lexer.get_source().len());
        Ok(Program::new(Node::operator(Operator::Sequence, forms, span)))
    }

    fn parse_form(&mut self, open: Token) -> Result<Node, ParserError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParserError {
                kind: ParserErrorKind::NestingTooDeep(MAX_NESTING_DEPTH),
                span: open.span,
            });
        }
        self.depth += 1;
        let form = self.parse_form_body(open);
        self.depth -= 1;
        form
    }

    fn parse_form_body(&mut self, open: Token) -> Result<Node, ParserError> {
        let head = self.expect_token()?;
        if head.kind != TokenKind::Identifier {
            return Err(ParserError::unexpected(head, TokenKind::Identifier));
        }
        let operator = Operator::from_symbol(&head.text).ok_or_else(|| ParserError {
            kind: ParserErrorKind::UnknownOperator(head.text.clone()),
            span: head.span,
        })?;

        let mut children = Vec::new();
        loop {
            let token = self.expect_token()?;
            let child = match token.kind {
                TokenKind::RightParenthesis => {
                    tracing::trace!(%operator, children = children.len(), "parsed form");
                    let span = open.span.join(&token.span);
                    return Ok(Node::operator(operator, children, span));
                }
                TokenKind::LeftParenthesis => self.parse_form(token)?,
                TokenKind::Number => {
                    let value = token.text.parse::<i64>().map_err(|_| ParserError {
                        kind: ParserErrorKind::InvalidInteger(token.text.clone()),
                        span: token.span,
                    })?;
                    Node {
                        kind: NodeKind::IntLiteral(value),
                        span: token.span,
                    }
                }
                TokenKind::Identifier => Node {
                    kind: NodeKind::Variable(token.text),
                    span: token.span,
                },
                TokenKind::String => Node {
                    kind: NodeKind::StringLiteral(token.text),
                    span: token.span,
                },
            };
            children.push(child);
        }
    }
}

/// Parses a whole source string in one call.
pub fn parse(source: &str) -> Result<Program, ParserError> {
    Parser::new(source).parse()
}
