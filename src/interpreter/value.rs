use super::error::{OperandKind, RuntimeErrorKind};
use crate::parser::Operator;
use compact_str::CompactString;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Integer(i64),
    String(CompactString),
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v}"),
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Integer(value as i64)
    }
}

impl Value {
    pub fn get_kind(&self) -> OperandKind {
        OperandKind::of_value(self)
    }

    pub fn as_integer(&self, operator: Operator) -> Result<i64, RuntimeErrorKind> {
        match self {
            Value::Integer(v) => Ok(*v),
            v => Err(RuntimeErrorKind::TypeMismatch {
                operator,
                expected: OperandKind::Integer,
                actual: v.get_kind(),
            }),
        }
    }

    fn integer_operands(
        &self,
        other: &Value,
        operator: Operator,
    ) -> Result<(i64, i64), RuntimeErrorKind> {
        Ok((self.as_integer(operator)?, other.as_integer(operator)?))
    }

    /// Zero is false, every other integer is true.
    pub fn is_truthy(&self, operator: Operator) -> Result<bool, RuntimeErrorKind> {
        Ok(self.as_integer(operator)? != 0)
    }
}

// Integer arithmetic. Every operation is checked.
impl Value {
    pub fn add(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        let operator = Operator::Add;
        let (lhs, rhs) = self.integer_operands(other, operator)?;
        lhs.checked_add(rhs)
            .map(Value::Integer)
            .ok_or(RuntimeErrorKind::IntegerOverflow(operator))
    }

    pub fn subtract(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        let operator = Operator::Subtract;
        let (lhs, rhs) = self.integer_operands(other, operator)?;
        lhs.checked_sub(rhs)
            .map(Value::Integer)
            .ok_or(RuntimeErrorKind::IntegerOverflow(operator))
    }

    pub fn multiply(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        let operator = Operator::Multiply;
        let (lhs, rhs) = self.integer_operands(other, operator)?;
        lhs.checked_mul(rhs)
            .map(Value::Integer)
            .ok_or(RuntimeErrorKind::IntegerOverflow(operator))
    }

    pub fn divide(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        let operator = Operator::Divide;
        let (lhs, rhs) = self.integer_operands(other, operator)?;
        if rhs == 0 {
            return Err(RuntimeErrorKind::DivisionByZero);
        }
        lhs.checked_div(rhs)
            .map(Value::Integer)
            .ok_or(RuntimeErrorKind::IntegerOverflow(operator))
    }
}

// Comparison
impl Value {
    pub fn greater_than(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        let (lhs, rhs) = self.integer_operands(other, Operator::GreaterThan)?;
        Ok((lhs > rhs).into())
    }

    pub fn less_than(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        let (lhs, rhs) = self.integer_operands(other, Operator::LessThan)?;
        Ok((lhs < rhs).into())
    }

    pub fn greater_than_or_equal(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        let (lhs, rhs) = self.integer_operands(other, Operator::GreaterThanEqual)?;
        Ok((lhs >= rhs).into())
    }

    pub fn less_than_or_equal(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        let (lhs, rhs) = self.integer_operands(other, Operator::LessThanEqual)?;
        Ok((lhs <= rhs).into())
    }

    /// Type-strict equality: comparing an integer with a string is an error.
    pub fn is_equal(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        match (self, other) {
            (Value::Integer(lhs), Value::Integer(rhs)) => Ok((lhs == rhs).into()),
            (Value::String(lhs), Value::String(rhs)) => Ok((lhs == rhs).into()),
            (lhs, rhs) => Err(RuntimeErrorKind::TypeMismatch {
                operator: Operator::Equal,
                expected: lhs.get_kind(),
                actual: rhs.get_kind(),
            }),
        }
    }
}

// Logic
impl Value {
    pub fn logical_and(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        let operator = Operator::And;
        let (lhs, rhs) = (self.is_truthy(operator)?, other.is_truthy(operator)?);
        Ok((lhs && rhs).into())
    }

    pub fn logical_or(&self, other: &Value) -> Result<Value, RuntimeErrorKind> {
        let operator = Operator::Or;
        let (lhs, rhs) = (self.is_truthy(operator)?, other.is_truthy(operator)?);
        Ok((lhs || rhs).into())
    }

    pub fn logical_not(&self) -> Result<Value, RuntimeErrorKind> {
        Ok((!self.is_truthy(Operator::Not)?).into())
    }
}
