use crate::value::Value;
use std::collections::HashMap;

/// The single global scope of a run. Names enter only through `define`.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    values: HashMap<String, Value>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    pub fn define(&mut self, name: &str, value: Value) {
        self.values.insert(name.to_string(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    pub fn exists(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Overwrites an existing binding. Returns false if `name` was never
    /// defined, leaving the environment untouched.
    pub fn set(&mut self, name: &str, value: Value) -> bool {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
