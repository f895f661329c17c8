use crate::lexer::Span;
use compact_str::CompactString;
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::LazyLock;

pub type IdentName = CompactString;

/// The closed set of operators that may lead a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Define,
    Sequence,
    If,
    GreaterThan,
    LessThan,
    Equal,
    GreaterThanEqual,
    LessThanEqual,
    And,
    Or,
    Not,
    Print,
    Input,
}

/// Leading identifiers recognised as operators.
pub static OPERATOR_HASHMAP: LazyLock<HashMap<&'static str, Operator>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    map.insert("+", Operator::Add);
    map.insert("-", Operator::Subtract);
    map.insert("*", Operator::Multiply);
    map.insert("/", Operator::Divide);
    map.insert("def", Operator::Define);
    map.insert("seq", Operator::Sequence);
    map.insert("if", Operator::If);
    map.insert(">", Operator::GreaterThan);
    map.insert("<", Operator::LessThan);
    map.insert("=", Operator::Equal);
    map.insert(">=", Operator::GreaterThanEqual);
    map.insert("<=", Operator::LessThanEqual);
    map.insert("and", Operator::And);
    map.insert("or", Operator::Or);
    map.insert("not", Operator::Not);
    map.insert("print", Operator::Print);
    map.insert("input", Operator::Input);
    map
});

impl Operator {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        OPERATOR_HASHMAP.get(symbol).copied()
    }

    /// The identifier that selects this operator in source text.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "*",
            Operator::Divide => "/",
            Operator::Define => "def",
            Operator::Sequence => "seq",
            Operator::If => "if",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::Equal => "=",
            Operator::GreaterThanEqual => ">=",
            Operator::LessThanEqual => "<=",
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Not => "not",
            Operator::Print => "print",
            Operator::Input => "input",
        }
    }

    /// Upper-case name used when rendering the syntax tree.
    pub fn name(&self) -> &'static str {
        match self {
            Operator::Add => "ADD",
            Operator::Subtract => "SUB",
            Operator::Multiply => "MUL",
            Operator::Divide => "DIV",
            Operator::Define => "DEF",
            Operator::Sequence => "SEQ",
            Operator::If => "IF",
            Operator::GreaterThan => "GT",
            Operator::LessThan => "LT",
            Operator::Equal => "EQ",
            Operator::GreaterThanEqual => "GTE",
            Operator::LessThanEqual => "LTE",
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Not => "NOT",
            Operator::Print => "PRINT",
            Operator::Input => "INPUT",
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Operator {
        operator: Operator,
        children: Vec<Node>,
    },
    IntLiteral(i64),
    Variable(IdentName),
    StringLiteral(CompactString),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Span,
}

impl Node {
    pub fn operator(operator: Operator, children: Vec<Node>, span: Span) -> Self {
        Self {
            kind: NodeKind::Operator { operator, children },
            span,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self.kind {
            NodeKind::Operator { ref children, .. } => children,
            _ => &[],
        }
    }
}

/// A parsed program: an implicit `seq` over every top-level form.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    root: Node,
}

impl Program {
    pub(super) fn new(root: Node) -> Self {
        Self { root }
    }

    pub fn get_root(&self) -> &Node {
        &self.root
    }

    pub fn forms(&self) -> &[Node] {
        self.root.children()
    }
}
