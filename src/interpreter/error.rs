use super::value::Value;
use crate::lexer::Span;
use crate::parser::{IdentName, Node, NodeKind, Operator};
use std::fmt::Display;
use thiserror::Error;

/// How many arguments an operator accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match *self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (qualifier, n) = match *self {
            Arity::Exactly(n) => ("exactly", n),
            Arity::AtLeast(n) => ("at least", n),
        };
        let plural = if n == 1 { "" } else { "s" };
        write!(f, "{qualifier} {n} argument{plural}")
    }
}

/// What an operand was, or was expected to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    Integer,
    String,
    Variable,
    Form,
}

impl OperandKind {
    pub fn of_value(value: &Value) -> Self {
        match value {
            Value::Integer(_) => OperandKind::Integer,
            Value::String(_) => OperandKind::String,
        }
    }

    pub fn of_node(node: &Node) -> Self {
        match node.kind {
            NodeKind::Operator { .. } => OperandKind::Form,
            NodeKind::IntLiteral(_) => OperandKind::Integer,
            NodeKind::Variable(_) => OperandKind::Variable,
            NodeKind::StringLiteral(_) => OperandKind::String,
        }
    }
}

impl Display for OperandKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OperandKind::Integer => write!(f, "integer"),
            OperandKind::String => write!(f, "string"),
            OperandKind::Variable => write!(f, "variable"),
            OperandKind::Form => write!(f, "form"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RuntimeErrorKind {
    #[error("Undefined variable `{0}`")]
    UndefinedVariable(IdentName),
    #[error("`{operator}` expects {expected} but got {actual}")]
    InvalidArgumentCount {
        operator: Operator,
        expected: Arity,
        actual: usize,
    },
    #[error("Type mismatch in `{operator}`: expected {expected} but got {actual}")]
    TypeMismatch {
        operator: Operator,
        expected: OperandKind,
        actual: OperandKind,
    },
    #[error("Division by zero")]
    DivisionByZero,
    #[error("Integer overflow in `{0}`")]
    IntegerOverflow(Operator),
    #[error("Operator `{0}` is not implemented")]
    Unimplemented(Operator),
}

#[derive(Debug, Error, Clone, PartialEq)]
#[error("{kind}")]
pub struct RuntimeError {
    #[source]
    pub kind: RuntimeErrorKind,
    pub span: Span,
}

impl RuntimeError {
    pub fn code(&self) -> &'static str {
        match self.kind {
            RuntimeErrorKind::UndefinedVariable(_) => "RT001",
            RuntimeErrorKind::InvalidArgumentCount { .. } => "RT002",
            RuntimeErrorKind::TypeMismatch { .. } => "RT003",
            RuntimeErrorKind::DivisionByZero => "RT004",
            RuntimeErrorKind::IntegerOverflow(_) => "RT005",
            RuntimeErrorKind::Unimplemented(_) => "RT006",
        }
    }
}
