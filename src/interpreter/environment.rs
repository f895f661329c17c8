use super::value::Value;
use crate::parser::IdentName;
use std::collections::HashMap;

/// The single global scope. There are no nested scopes: defining a name that
/// is already bound overwrites the existing binding in place.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    values: HashMap<IdentName, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn access(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn define(&mut self, name: &str, value: Value) {
        match self.values.get_mut(name) {
            Some(slot) => *slot = value,
            None => {
                self.values.insert(name.into(), value);
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
