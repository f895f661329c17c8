pub mod context;
pub mod environment;
pub mod error;
pub mod formatter;
mod tree;
mod value;

pub use tree::TreeWalkInterpreter;
pub use value::Value;

/// Where `print` output goes.
pub trait SystemContext {
    fn writeln(&mut self, text: &str);
}
