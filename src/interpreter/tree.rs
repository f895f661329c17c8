use super::environment::Environment;
use super::error::{Arity, OperandKind, RuntimeError, RuntimeErrorKind};
use super::value::Value;
use super::SystemContext;
use crate::lexer::Span;
use crate::parser::{Node, NodeKind, Operator, Program};
use compact_str::CompactString;
use std::fmt::Write;

/// Evaluates a program by walking its syntax tree.
///
/// The interpreter owns the global environment, so bindings made by one `run`
/// stay visible to the next. Output from `print` goes to the context passed to
/// each call.
#[derive(Debug, Default)]
pub struct TreeWalkInterpreter {
    environment: Environment,
}

impl TreeWalkInterpreter {
    pub fn new() -> Self {
        Self {
            environment: Environment::new(),
        }
    }

    pub fn get_environment(&self) -> &Environment {
        &self.environment
    }

    pub fn run<C: SystemContext>(
        &mut self,
        program: &Program,
        context: &mut C,
    ) -> Result<Value, RuntimeError> {
        self.evaluate(program.get_root(), context)
    }

    pub fn evaluate<C: SystemContext>(
        &mut self,
        node: &Node,
        context: &mut C,
    ) -> Result<Value, RuntimeError> {
        match node.kind {
            NodeKind::IntLiteral(v) => Ok(Value::Integer(v)),
            NodeKind::StringLiteral(ref v) => Ok(Value::String(v.clone())),
            NodeKind::Variable(ref name) => {
                self.environment
                    .access(name)
                    .cloned()
                    .ok_or_else(|| RuntimeError {
                        kind: RuntimeErrorKind::UndefinedVariable(name.clone()),
                        span: node.span,
                    })
            }
            NodeKind::Operator {
                operator,
                ref children,
            } => self.evaluate_operator(operator, children, node.span, context),
        }
    }
}

// Operators
impl TreeWalkInterpreter {
    #[tracing::instrument(level = "trace", skip_all, fields(operator = %operator, arguments = children.len()))]
    fn evaluate_operator<C: SystemContext>(
        &mut self,
        operator: Operator,
        children: &[Node],
        span: Span,
        context: &mut C,
    ) -> Result<Value, RuntimeError> {
        Self::check_arity(operator, children, span)?;

        match operator {
            Operator::Add => self.evaluate_add(children, span, context),
            Operator::Subtract | Operator::Multiply | Operator::Divide => {
                self.evaluate_fold(operator, children, span, context)
            }
            Operator::Define => self.evaluate_define(children, context),
            Operator::Sequence => self.evaluate_sequence(children, context),
            Operator::If => self.evaluate_if(children, context),
            Operator::GreaterThan
            | Operator::LessThan
            | Operator::GreaterThanEqual
            | Operator::LessThanEqual => self.evaluate_comparison(operator, children, span, context),
            Operator::Equal => {
                let lhs = self.evaluate(&children[0], context)?;
                let rhs = self.evaluate(&children[1], context)?;
                lhs.is_equal(&rhs).map_err(|kind| RuntimeError { kind, span })
            }
            Operator::And | Operator::Or => {
                let lhs = self.evaluate_integer(operator, &children[0], context)?;
                let rhs = self.evaluate_integer(operator, &children[1], context)?;
                let result = match operator {
                    Operator::And => lhs.logical_and(&rhs),
                    _ => lhs.logical_or(&rhs),
                };
                result.map_err(|kind| RuntimeError { kind, span })
            }
            Operator::Not => {
                let value = self.evaluate_integer(operator, &children[0], context)?;
                value.logical_not().map_err(|kind| RuntimeError { kind, span })
            }
            Operator::Print => self.evaluate_print(children, context),
            Operator::Input => Err(RuntimeError {
                kind: RuntimeErrorKind::Unimplemented(operator),
                span,
            }),
        }
    }

    fn get_arity(operator: Operator) -> Arity {
        match operator {
            Operator::Add
            | Operator::Multiply
            | Operator::Sequence
            | Operator::Print
            | Operator::Input => Arity::AtLeast(0),
            Operator::Subtract | Operator::Divide => Arity::AtLeast(1),
            Operator::Not => Arity::Exactly(1),
            Operator::Define
            | Operator::GreaterThan
            | Operator::LessThan
            | Operator::Equal
            | Operator::GreaterThanEqual
            | Operator::LessThanEqual
            | Operator::And
            | Operator::Or => Arity::Exactly(2),
            Operator::If => Arity::Exactly(3),
        }
    }

    fn check_arity(operator: Operator, children: &[Node], span: Span) -> Result<(), RuntimeError> {
        let expected = Self::get_arity(operator);
        if expected.accepts(children.len()) {
            Ok(())
        } else {
            Err(RuntimeError {
                kind: RuntimeErrorKind::InvalidArgumentCount {
                    operator,
                    expected,
                    actual: children.len(),
                },
                span,
            })
        }
    }

    /// Evaluates an operand that must produce an integer, blaming the operand on failure.
    fn evaluate_integer<C: SystemContext>(
        &mut self,
        operator: Operator,
        node: &Node,
        context: &mut C,
    ) -> Result<Value, RuntimeError> {
        let value = self.evaluate(node, context)?;
        value.as_integer(operator).map_err(|kind| RuntimeError {
            kind,
            span: node.span,
        })?;
        Ok(value)
    }

    fn evaluate_add<C: SystemContext>(
        &mut self,
        children: &[Node],
        span: Span,
        context: &mut C,
    ) -> Result<Value, RuntimeError> {
        // Each operand is evaluated once; the cached values decide between
        // concatenation and summation.
        let values = children
            .iter()
            .map(|child| self.evaluate(child, context))
            .collect::<Result<Vec<_>, _>>()?;

        if values.iter().any(|v| matches!(v, Value::String(_))) {
            let mut buffer = CompactString::default();
            for value in values.iter() {
                write!(buffer, "{value}").expect("Writing into a string cannot fail.");
            }
            return Ok(Value::String(buffer));
        }

        values
            .iter()
            .try_fold(Value::Integer(0), |sum, value| sum.add(value))
            .map_err(|kind| RuntimeError { kind, span })
    }

    fn evaluate_fold<C: SystemContext>(
        &mut self,
        operator: Operator,
        children: &[Node],
        span: Span,
        context: &mut C,
    ) -> Result<Value, RuntimeError> {
        let (mut accumulator, rest) = match (operator, children.split_first()) {
            (Operator::Multiply, _) | (_, None) => (Value::Integer(1), children),
            (_, Some((first, rest))) => (self.evaluate_integer(operator, first, context)?, rest),
        };

        for child in rest {
            let value = self.evaluate_integer(operator, child, context)?;
            let result = match operator {
                Operator::Subtract => accumulator.subtract(&value),
                Operator::Multiply => accumulator.multiply(&value),
                _ => accumulator.divide(&value),
            };
            accumulator = result.map_err(|kind| {
                let span = match kind {
                    RuntimeErrorKind::DivisionByZero => child.span,
                    _ => span,
                };
                RuntimeError { kind, span }
            })?;
        }
        Ok(accumulator)
    }

    fn evaluate_define<C: SystemContext>(
        &mut self,
        children: &[Node],
        context: &mut C,
    ) -> Result<Value, RuntimeError> {
        let (target, expression) = (&children[0], &children[1]);
        let NodeKind::Variable(ref name) = target.kind else {
            return Err(RuntimeError {
                kind: RuntimeErrorKind::TypeMismatch {
                    operator: Operator::Define,
                    expected: OperandKind::Variable,
                    actual: OperandKind::of_node(target),
                },
                span: target.span,
            });
        };

        let value = self.evaluate(expression, context)?;
        tracing::debug!(%name, %value, "binding variable");
        self.environment.define(name, value.clone());
        Ok(value)
    }

    fn evaluate_sequence<C: SystemContext>(
        &mut self,
        children: &[Node],
        context: &mut C,
    ) -> Result<Value, RuntimeError> {
        let mut last = Value::Integer(0);
        for child in children {
            last = self.evaluate(child, context)?;
        }
        Ok(last)
    }

    fn evaluate_if<C: SystemContext>(
        &mut self,
        children: &[Node],
        context: &mut C,
    ) -> Result<Value, RuntimeError> {
        let condition = &children[0];
        let is_true = self
            .evaluate(condition, context)?
            .is_truthy(Operator::If)
            .map_err(|kind| RuntimeError {
                kind,
                span: condition.span,
            })?;

        let branch = if is_true { &children[1] } else { &children[2] };
        self.evaluate(branch, context)
    }

    fn evaluate_comparison<C: SystemContext>(
        &mut self,
        operator: Operator,
        children: &[Node],
        span: Span,
        context: &mut C,
    ) -> Result<Value, RuntimeError> {
        let lhs = self.evaluate_integer(operator, &children[0], context)?;
        let rhs = self.evaluate_integer(operator, &children[1], context)?;
        let result = match operator {
            Operator::GreaterThan => lhs.greater_than(&rhs),
            Operator::LessThan => lhs.less_than(&rhs),
            Operator::GreaterThanEqual => lhs.greater_than_or_equal(&rhs),
            _ => lhs.less_than_or_equal(&rhs),
        };
        result.map_err(|kind| RuntimeError { kind, span })
    }

    fn evaluate_print<C: SystemContext>(
        &mut self,
        children: &[Node],
        context: &mut C,
    ) -> Result<Value, RuntimeError> {
        for child in children {
            let value = self.evaluate(child, context)?;
            context.writeln(&format!("{value}"));
        }
        Ok(Value::Integer(0))
    }
}
