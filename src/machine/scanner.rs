//! Prefix tokenizer / sub-parser
//!
//! Given the unscanned suffix of a source string, classify exactly one
//! leading token and report how many bytes it consumed. Classification is
//! strictly first-character-driven:
//!
//! - digit run → integer literal
//! - letter run → variable name
//! - `'c` → the code point of `c` as an integer literal
//! - `"..."` → text emitted directly to output (escapes unsupported)
//! - `{...}` → brace-balanced comment, no effect
//! - `[...]` → bracket-balanced code literal; nested `{...}` spans are
//!   skipped with the comment scanner so an unbalanced brace inside a
//!   comment can never desynchronize the bracket count
//! - anything else → a single opcode character
//!
//! Lengths are byte lengths; multi-byte opcode characters consume their
//! full UTF-8 encoding.

use std::rc::Rc;

use super::errors::RuntimeError;

/// One classified token.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Integer literal to push.
    Int(i64),
    /// Variable name to push as text.
    Name(String),
    /// Code point of a `'`-quoted character, pushed as an integer.
    CharCode(i64),
    /// Double-quoted text, emitted directly to the output sink.
    Emit(String),
    /// Brace-balanced comment; no effect.
    Comment,
    /// Bracket-balanced code literal, outer brackets excluded.
    Quote(Rc<str>),
    /// Any other single character, dispatched to the opcode table.
    Opcode(char),
}

/// A token plus the number of bytes it consumed from the source suffix.
#[derive(Debug, Clone, PartialEq)]
pub struct Scanned {
    pub token: Token,
    pub len: usize,
}

/// Scan one token from the start of `src`. `src` must be non-empty.
pub fn scan(src: &str) -> Result<Scanned, RuntimeError> {
    let first = src
        .chars()
        .next()
        .ok_or(RuntimeError::UnexpectedEndOfInput)?;

    if first.is_ascii_digit() {
        return scan_number(src);
    }
    if first.is_ascii_alphabetic() {
        return scan_name(src);
    }
    match first {
        '\'' => scan_char(src),
        '"' => scan_string(src),
        '{' => {
            let len = scan_comment(src)?;
            Ok(Scanned {
                token: Token::Comment,
                len,
            })
        }
        '[' => scan_function(src),
        other => Ok(Scanned {
            token: Token::Opcode(other),
            len: other.len_utf8(),
        }),
    }
}

fn scan_number(src: &str) -> Result<Scanned, RuntimeError> {
    let digits: &str = {
        let end = src
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(src.len());
        &src[..end]
    };
    let n: i64 = digits
        .parse()
        .map_err(|_| RuntimeError::RangeError {
            op: "integer literal",
            arg: digits.to_string(),
        })?;
    Ok(Scanned {
        token: Token::Int(n),
        len: digits.len(),
    })
}

fn scan_name(src: &str) -> Result<Scanned, RuntimeError> {
    let end = src
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(src.len());
    Ok(Scanned {
        token: Token::Name(src[..end].to_string()),
        len: end,
    })
}

fn scan_char(src: &str) -> Result<Scanned, RuntimeError> {
    let mut chars = src.chars();
    chars.next(); // the apostrophe
    let c = chars.next().ok_or(RuntimeError::UnexpectedEndOfInput)?;
    Ok(Scanned {
        token: Token::CharCode(c as i64),
        len: 1 + c.len_utf8(),
    })
}

fn scan_string(src: &str) -> Result<Scanned, RuntimeError> {
    // No escape handling: the next double quote always closes the literal.
    let close = src[1..]
        .find('"')
        .ok_or(RuntimeError::UnterminatedString)?;
    Ok(Scanned {
        token: Token::Emit(src[1..1 + close].to_string()),
        len: close + 2,
    })
}

/// Consume a brace-balanced comment starting at the leading `{`, returning
/// the full span length including both braces.
fn scan_comment(src: &str) -> Result<usize, RuntimeError> {
    let mut depth = 0usize;
    let mut pos = 0usize;
    loop {
        let Some(c) = src[pos..].chars().next() else {
            return Err(RuntimeError::UnterminatedComment);
        };
        match c {
            '{' => depth += 1,
            '}' => depth -= 1,
            _ => {}
        }
        pos += c.len_utf8();
        if depth == 0 {
            return Ok(pos);
        }
    }
}

fn scan_function(src: &str) -> Result<Scanned, RuntimeError> {
    let mut depth = 0usize;
    let mut pos = 0usize;
    loop {
        let Some(c) = src[pos..].chars().next() else {
            return Err(RuntimeError::UnterminatedFunction);
        };
        match c {
            '[' => {
                depth += 1;
                pos += 1;
            }
            ']' => {
                depth -= 1;
                pos += 1;
            }
            '{' => {
                // Comments nest their own brace depth; skip the whole span
                // so braces inside never touch the bracket counter.
                pos += scan_comment(&src[pos..])?;
            }
            other => pos += other.len_utf8(),
        }
        if depth == 0 {
            let code = &src[1..pos - 1];
            return Ok(Scanned {
                token: Token::Quote(Rc::from(code)),
                len: pos,
            });
        }
    }
}
