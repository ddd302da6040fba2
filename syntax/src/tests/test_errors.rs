use insta::assert_snapshot;

use crate::parse;
use crate::parser::ParseError;

fn err(input: &str) -> String {
    parse(input).unwrap_err().to_string()
}

#[test]
fn test_empty_input() {
    assert_snapshot!(err(""), @"expected expression, found end of input at byte 0");
}

#[test]
fn test_trailing_tokens() {
    assert_snapshot!(err("1 2"), @"expected end of input, found number at byte 2");
}

#[test]
fn test_unmatched_paren() {
    assert_snapshot!(err("(a + b"), @"expected `)`, found end of input at byte 6");
}

#[test]
fn test_empty_parens() {
    assert_snapshot!(err("()"), @"expected expression, found `)` at byte 1");
}

#[test]
fn test_missing_rhs_operand() {
    assert_snapshot!(err("a + "), @"expected expression after `+`, found end of input at byte 4");
}

#[test]
fn test_operator_as_operand() {
    assert_snapshot!(err("a + * b"), @"expected expression after `+`, found `*` at byte 4");
}

#[test]
fn test_missing_unary_operand() {
    assert_snapshot!(err("-"), @"expected expression after `-`, found end of input at byte 1");
}

#[test]
fn test_member_access_without_call() {
    assert_snapshot!(
        err("a.b"),
        @"expected `(` after member name (member access is not supported), found end of input at byte 3"
    );
}

#[test]
fn test_call_on_non_identifier() {
    assert_snapshot!(err("5(1)"), @"expected call callee (identifier), found `(` at byte 1");
}

#[test]
fn test_trailing_comma_in_list() {
    assert_snapshot!(
        err("[1, 2,]"),
        @"expected expression (trailing comma in list literal is not supported), found `]` at byte 6"
    );
}

#[test]
fn test_missing_expr_in_arg_list() {
    assert_snapshot!(err("f(,1)"), @"expected expression, found `,` at byte 2");
}

#[test]
fn test_missing_expr_after_comma_in_args() {
    assert_snapshot!(err("f(1,)"), @"expected expression after `,`, found `)` at byte 4");
}

#[test]
fn test_unmatched_bracket() {
    assert_snapshot!(err("[1, 2"), @"expected `]`, found end of input at byte 5");
}

#[test]
fn test_lex_error_surfaces_as_parse_error() {
    let e = parse("1 $ 2").unwrap_err();
    assert!(matches!(e, ParseError::Lex(_)));
    assert_snapshot!(e.to_string(), @"unexpected char '$' at byte 2");
}

#[test]
fn test_trailing_identifier() {
    assert_snapshot!(err("@3 x"), @"expected end of input, found identifier `x` at byte 3");
}
