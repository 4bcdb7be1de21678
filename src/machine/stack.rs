//! Operand stack
//!
//! Typed pops implement the legacy coercion rules: bool-to-int and
//! int-to-bool are lossy but allowed (with a warning), string-to-function
//! treats the text as code. Any other mismatch is a `TypeError` and the
//! popped value is pushed back first, so a failed pop leaves the stack
//! exactly as it found it.

use serde::{Deserialize, Serialize};
use std::rc::Rc;
use tracing::warn;

use super::errors::RuntimeError;
use super::values::Value;

/// The operand stack. Top of stack is the last element.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Stack {
    items: Vec<Value>,
}

impl Stack {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Iterate values from bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &Value> {
        self.items.iter()
    }

    /* ===================== Push / Pop ===================== */

    pub fn push(&mut self, v: Value) {
        self.items.push(v);
    }

    pub fn push_int(&mut self, n: i64) {
        self.items.push(Value::Int(n));
    }

    pub fn push_bool(&mut self, b: bool) {
        self.items.push(Value::Bool(b));
    }

    pub fn push_text(&mut self, s: String) {
        self.items.push(Value::Text(s));
    }

    pub fn push_code(&mut self, c: Rc<str>) {
        self.items.push(Value::Code(c));
    }

    pub fn pop(&mut self) -> Result<Value, RuntimeError> {
        self.items.pop().ok_or(RuntimeError::StackUnderflow)
    }

    pub fn pop_int(&mut self) -> Result<i64, RuntimeError> {
        match self.pop()? {
            Value::Int(n) => Ok(n),
            Value::Bool(b) => {
                warn!("typecast from bool to int");
                Ok(if b { -1 } else { 0 })
            }
            other => {
                let found = other.tag();
                self.push(other);
                Err(RuntimeError::TypeError {
                    expected: "int",
                    found,
                })
            }
        }
    }

    pub fn pop_bool(&mut self) -> Result<bool, RuntimeError> {
        match self.pop()? {
            Value::Bool(b) => Ok(b),
            Value::Int(n) => {
                warn!("typecast from int to bool");
                Ok(n != 0)
            }
            other => {
                let found = other.tag();
                self.push(other);
                Err(RuntimeError::TypeError {
                    expected: "bool",
                    found,
                })
            }
        }
    }

    pub fn pop_text(&mut self) -> Result<String, RuntimeError> {
        match self.pop()? {
            Value::Text(s) => Ok(s),
            other => {
                let found = other.tag();
                self.push(other);
                Err(RuntimeError::TypeError {
                    expected: "string",
                    found,
                })
            }
        }
    }

    pub fn pop_code(&mut self) -> Result<Rc<str>, RuntimeError> {
        match self.pop()? {
            Value::Code(c) => Ok(c),
            Value::Text(s) => {
                warn!("typecast from string to function");
                Ok(Rc::from(s.as_str()))
            }
            other => {
                let found = other.tag();
                self.push(other);
                Err(RuntimeError::TypeError {
                    expected: "function",
                    found,
                })
            }
        }
    }

    /* ===================== Structural Operations ===================== */

    /// Duplicate the top value (`$`).
    pub fn dup(&mut self) -> Result<(), RuntimeError> {
        let v = self.pop()?;
        self.push(v.clone());
        self.push(v);
        Ok(())
    }

    /// Discard the top value (`%`).
    pub fn discard(&mut self) -> Result<(), RuntimeError> {
        self.pop().map(|_| ())
    }

    /// Swap the top two values (`\`).
    pub fn swap(&mut self) -> Result<(), RuntimeError> {
        let a = self.pop()?;
        let b = self.pop()?;
        self.push(a);
        self.push(b);
        Ok(())
    }

    /// Rotate the top three values (`@`): the third-from-top moves to the
    /// top, the former top two slide down in order.
    pub fn rotate3(&mut self) -> Result<(), RuntimeError> {
        let a = self.pop()?;
        let b = self.pop()?;
        let c = self.pop()?;
        self.push(b);
        self.push(a);
        self.push(c);
        Ok(())
    }

    /// Copy the value `n` positions below the top onto the top (`ø`),
    /// 0-indexed from the top.
    pub fn pick(&mut self, n: i64) -> Result<(), RuntimeError> {
        if n < 0 || n as usize >= self.items.len() {
            return Err(RuntimeError::RangeError {
                op: "pick opcode",
                arg: n.to_string(),
            });
        }
        let v = self.items[self.items.len() - 1 - n as usize].clone();
        self.push(v);
        Ok(())
    }

    /// Rotate the top `n` values (`®`): remove the n-th-from-top value
    /// (counting the top as 1) and re-push it on top. `n` of 0 or 1 has no
    /// effect.
    pub fn roll(&mut self, n: i64) -> Result<(), RuntimeError> {
        if n < 0 || n as usize > self.items.len() {
            return Err(RuntimeError::RangeError {
                op: "rotate n opcode",
                arg: n.to_string(),
            });
        }
        if n > 1 {
            let v = self.items.remove(self.items.len() - n as usize);
            self.push(v);
        }
        Ok(())
    }
}
