use std::collections::HashMap;

use rust_decimal_macros::dec;

use crate::tests::common::vars;
use crate::value::{Num, Value};
use crate::{Engine, Error, EvalError, evaluate, parse};

fn eval(
    text: &str,
    context: HashMap<String, Value>,
    positional: &[Value],
) -> Result<Value, Error> {
    Engine::new().eval(text, &context, positional)
}

fn eval_ok(text: &str, context: HashMap<String, Value>) -> Value {
    eval(text, context, &[]).unwrap()
}

fn eval_err(text: &str, context: HashMap<String, Value>) -> EvalError {
    match eval(text, context, &[]).unwrap_err() {
        Error::Eval(e) => e,
        Error::Parse(e) => panic!("expected eval error, got parse error: {e}"),
    }
}

#[test]
fn test_reference_arithmetic_is_exact() {
    // Exactly 105, as an integer: no float drift, no truncation surprises.
    let result = eval_ok("(a*2 + 100)/b", vars([("a", 55.into()), ("b", 2.into())]));
    assert_eq!(result, Value::Num(Num::Int(105)));

    let result = eval_ok("A * (B + 10)", vars([("A", 10.into()), ("B", 12.into())]));
    assert_eq!(result, Value::from(220));
}

#[test]
fn test_precedence_and_unary() {
    assert_eq!(eval_ok("1 + 2 * 3", vars([])), Value::from(7));
    assert_eq!(eval_ok("(1 + 2) * 3", vars([])), Value::from(9));
    assert_eq!(eval_ok("-2 * 3", vars([])), Value::from(-6));
    assert_eq!(eval_ok("-(2 * 3)", vars([])), Value::from(-6));
}

#[test]
fn test_inexact_division_promotes() {
    assert_eq!(eval_ok("7/2", vars([])), Value::from(dec!(3.5)));
}

#[test]
fn test_decimal_literals_have_no_drift() {
    // 0.1 + 0.2 is exactly 0.3 in decimal; binary floating point gets this wrong.
    assert_eq!(eval_ok("0.1 + 0.2", vars([])), Value::from(dec!(0.3)));
    assert_eq!(eval_ok("1.1 * 3", vars([])), Value::from(dec!(3.3)));
}

#[test]
fn test_division_precision_is_decimal() {
    // 1/3 carries 28 fractional digits; times 3 lands a hair under one,
    // exactly as C#-style decimal arithmetic does.
    assert_eq!(
        eval_ok("1/3 * 3", vars([])),
        Value::from(dec!(0.9999999999999999999999999999))
    );
}

#[test]
fn test_positional_arguments() {
    let result = eval(
        "A + @0 + @1",
        vars([("A", 1.into())]),
        &[6.into(), 7.into()],
    )
    .unwrap();
    assert_eq!(result, Value::from(14));
}

#[test]
fn test_positional_out_of_range() {
    let err = eval("@2", vars([]), &[6.into(), 7.into()]).unwrap_err();
    assert_eq!(
        err,
        Error::Eval(EvalError::PositionalOutOfRange {
            index: 2,
            supplied: 2,
        })
    );
}

#[test]
fn test_division_by_zero() {
    let err = eval_err("a/b", vars([("a", 1.into()), ("b", 0.into())]));
    assert_eq!(err, EvalError::DivisionByZero);

    let err = eval_err("1/0.0", vars([]));
    assert_eq!(err, EvalError::DivisionByZero);
}

#[test]
fn test_unbound_variable() {
    let err = eval_err("a+b", vars([("a", 1.into())]));
    assert_eq!(err, EvalError::UnboundVariable("b".to_string()));
}

#[test]
fn test_context_is_case_sensitive() {
    let err = eval_err("a + 1", vars([("A", 1.into())]));
    assert_eq!(err, EvalError::UnboundVariable("a".to_string()));
}

#[test]
fn test_operators_reject_non_numbers() {
    let err = eval_err("s * 2", vars([("s", "x".into())]));
    assert!(matches!(err, EvalError::InvalidOperands { op: "*", .. }));

    let err = eval_err("-s", vars([("s", "x".into())]));
    assert!(matches!(err, EvalError::InvalidNegation(_)));
}

#[test]
fn test_string_literals_and_methods() {
    assert_eq!(eval_ok("\"abc\".length()", vars([])), Value::from(3));
    assert_eq!(
        eval_ok("s.upper()", vars([("s", "ab".into())])),
        Value::from("AB")
    );
    assert_eq!(
        eval_ok("\"123456\".startsWith(\"123\")", vars([])),
        Value::from(true)
    );
    assert_eq!(
        eval_ok("\"123456\".startsWith(\"789\")", vars([])),
        Value::from(false)
    );
}

#[test]
fn test_list_literals_evaluate_in_order() {
    let result = eval_ok("[a, 2, \"x\"]", vars([("a", 1.into())]));
    assert_eq!(
        result,
        Value::List(vec![1.into(), 2.into(), "x".into()])
    );
}

#[test]
fn test_list_methods() {
    assert_eq!(eval_ok("[1, 2, 3].length()", vars([])), Value::from(3));
    assert_eq!(eval_ok("[1, 2, 3].at(1)", vars([])), Value::from(2));
    assert_eq!(
        eval_ok("xs.last()", vars([("xs", vec![1.into(), 9.into()].into())])),
        Value::from(9)
    );
    assert_eq!(
        eval_ok("[\"a\", \"b\"].join(\"-\")", vars([])),
        Value::from("a-b")
    );
}

#[test]
fn test_math_builtins() {
    assert_eq!(eval_ok("sqrt(100)", vars([])), Value::from(10));
    assert_eq!(eval_ok("abs(-5)", vars([])), Value::from(5));
    assert_eq!(eval_ok("pow(2, 10)", vars([])), Value::from(1024));
    assert_eq!(eval_ok("round(3.456, 2)", vars([])), Value::from(dec!(3.46)));
    assert_eq!(eval_ok("floor(3.7)", vars([])), Value::from(3));
    assert_eq!(eval_ok("ceil(3.2)", vars([])), Value::from(4));
}

#[test]
fn test_variadic_builtins() {
    assert_eq!(eval_ok("sum(1, 2, 3)", vars([])), Value::from(6));
    assert_eq!(eval_ok("min(4, 2, 9)", vars([])), Value::from(2));
    assert_eq!(eval_ok("max(4, 2, 9)", vars([])), Value::from(9));
    // A single list argument spreads.
    assert_eq!(eval_ok("min([4, 2, 9])", vars([])), Value::from(2));
    assert_eq!(eval_ok("sum([1, 2, 3]) + sum(4, 5)", vars([])), Value::from(15));
}

#[test]
fn test_sqrt_in_arithmetic() {
    // `A + B + 10 + sqrt(100)` with A=1, B=6.
    let result = eval_ok(
        "A + B + 10 + sqrt(100)",
        vars([("A", 1.into()), ("B", 6.into())]),
    );
    assert_eq!(result, Value::from(27));
}

#[test]
fn test_evaluate_matches_composite_eval() {
    let cases = [
        "(a*2 + 100)/b",
        "a + b.length()",
        "sum(a, @0, 3)",
        "[a, -a]",
    ];
    let context = vars([("a", 55.into()), ("b", "xyz".into())]);
    let positional = [2.into()];

    for text in cases {
        let ast = parse(text).unwrap();
        let direct = evaluate(&ast, &context, &positional).unwrap();
        let composite = Engine::new().eval(text, &context, &positional).unwrap();
        assert_eq!(direct, composite, "mismatch for {text:?}");
    }
}

#[test]
fn test_parse_error_surfaces_through_eval() {
    let err = eval("1 +", vars([]), &[]).unwrap_err();
    assert!(matches!(err, Error::Parse(_)));
}
