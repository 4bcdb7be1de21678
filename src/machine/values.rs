//! Runtime value types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Runtime value type
///
/// A value's tag never changes after creation. Operations that need a
/// different shape go through the explicit coercions on [`Stack`]'s typed
/// pops and produce a new value.
///
/// [`Stack`]: super::stack::Stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "t", content = "v")]
pub enum Value {
    /// 64-bit signed integer, two's-complement wraparound semantics.
    Int(i64),
    Bool(bool),
    /// Transient text: variable names and nothing else long-lived.
    Text(String),
    /// Unevaluated source slice between matching `[` `]`, excluding the
    /// brackets themselves. Shared cheaply on duplication and apply.
    Code(Rc<str>),
}

impl Value {
    /// Tag name used in type-error messages and coercion warnings.
    pub fn tag(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Bool(_) => "bool",
            Value::Text(_) => "string",
            Value::Code(_) => "function",
        }
    }
}

/// Human-readable rendering for stack and storage display: integers as
/// decimal, booleans as `true`/`false`, text double-quoted, code bracketed.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Text(s) => write!(f, "\"{}\"", s),
            Value::Code(c) => write!(f, "[{}]", c),
        }
    }
}
