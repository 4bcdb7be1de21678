//! Tests for the prefix tokenizer

use crate::machine::errors::RuntimeError;
use crate::machine::scanner::{scan, Token};

#[test]
fn test_scan_number() {
    let s = scan("123abc").unwrap();
    assert_eq!(s.token, Token::Int(123));
    assert_eq!(s.len, 3);
}

#[test]
fn test_scan_number_overflow() {
    // Past i64::MAX; the digits are otherwise well-formed.
    let err = scan("99999999999999999999").unwrap_err();
    assert!(matches!(err, RuntimeError::RangeError { .. }));
}

#[test]
fn test_scan_name() {
    let s = scan("abcDE1").unwrap();
    assert_eq!(s.token, Token::Name("abcDE".to_string()));
    assert_eq!(s.len, 5);
}

#[test]
fn test_scan_char_literal() {
    let s = scan("'A,").unwrap();
    assert_eq!(s.token, Token::CharCode(65));
    assert_eq!(s.len, 2);
}

#[test]
fn test_scan_char_literal_at_end_of_input() {
    assert_eq!(scan("'").unwrap_err(), RuntimeError::UnexpectedEndOfInput);
}

#[test]
fn test_scan_string_emits_enclosed_text() {
    let s = scan("\"hi\"rest").unwrap();
    assert_eq!(s.token, Token::Emit("hi".to_string()));
    assert_eq!(s.len, 4);
}

#[test]
fn test_scan_string_unterminated() {
    assert_eq!(scan("\"oops").unwrap_err(), RuntimeError::UnterminatedString);
}

#[test]
fn test_scan_comment_spans_nested_braces() {
    let src = "{a{b}c}x";
    let s = scan(src).unwrap();
    assert_eq!(s.token, Token::Comment);
    assert_eq!(s.len, 7);
    assert_eq!(&src[s.len..], "x");
}

#[test]
fn test_scan_comment_unterminated() {
    assert_eq!(scan("{a{b}").unwrap_err(), RuntimeError::UnterminatedComment);
}

#[test]
fn test_scan_function_consumes_exact_span() {
    let src = "[1 2+]rest";
    let s = scan(src).unwrap();
    assert_eq!(s.len, 6);
    match s.token {
        Token::Quote(code) => assert_eq!(&*code, "1 2+"),
        other => panic!("expected quote, got {:?}", other),
    }
}

#[test]
fn test_scan_function_nested_brackets() {
    let s = scan("[1[2]3]x").unwrap();
    assert_eq!(s.len, 7);
    match s.token {
        Token::Quote(code) => assert_eq!(&*code, "1[2]3"),
        other => panic!("expected quote, got {:?}", other),
    }
}

#[test]
fn test_brace_inside_function_never_touches_bracket_depth() {
    // The ']' inside the comment must not close the function literal.
    let src = "[1{ ] }2]x";
    let s = scan(src).unwrap();
    assert_eq!(s.len, 9);
    match s.token {
        Token::Quote(code) => assert_eq!(&*code, "1{ ] }2"),
        other => panic!("expected quote, got {:?}", other),
    }
}

#[test]
fn test_scan_function_unterminated() {
    assert_eq!(
        scan("[1 2").unwrap_err(),
        RuntimeError::UnterminatedFunction
    );
}

#[test]
fn test_scan_function_with_unterminated_comment() {
    assert_eq!(
        scan("[1{2]").unwrap_err(),
        RuntimeError::UnterminatedComment
    );
}

#[test]
fn test_scan_opcode_ascii() {
    let s = scan("+1").unwrap();
    assert_eq!(s.token, Token::Opcode('+'));
    assert_eq!(s.len, 1);
}

#[test]
fn test_scan_opcode_multibyte() {
    // 'ø' is two bytes in UTF-8; consumed length is the full encoding.
    let s = scan("ø$").unwrap();
    assert_eq!(s.token, Token::Opcode('ø'));
    assert_eq!(s.len, 'ø'.len_utf8());
}
