pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
mod report;
pub mod source;

use error::LispError;
use interpreter::{SystemContext, TreeWalkInterpreter, Value};

/// Parses and evaluates `source` in a fresh environment.
pub fn interpret<C: SystemContext>(source: &str, context: &mut C) -> Result<Value, LispError> {
    let program = parser::parse(source)?;
    let mut interpreter = TreeWalkInterpreter::new();
    Ok(interpreter.run(&program, context)?)
}
