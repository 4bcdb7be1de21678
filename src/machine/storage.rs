//! Variable storage
//!
//! A single flat namespace for the whole program run. Defining a name
//! overwrites unconditionally; reading an absent name is an error, never a
//! default.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::errors::RuntimeError;
use super::values::Value;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Storage {
    data: HashMap<String, Value>,
}

impl Storage {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
        }
    }

    pub fn clear(&mut self) {
        self.data.clear();
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bind `name` to `value`, replacing any previous binding.
    pub fn define(&mut self, name: String, value: Value) {
        self.data.insert(name, value);
    }

    pub fn lookup(&self, name: &str) -> Result<Value, RuntimeError> {
        self.data
            .get(name)
            .cloned()
            .ok_or_else(|| RuntimeError::UndefinedVariable(name.to_string()))
    }

    /// Iterate bindings in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.data.iter()
    }
}
