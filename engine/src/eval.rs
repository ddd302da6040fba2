//! Tree-walking evaluator.
//!
//! Evaluation order is strictly left-to-right, depth-first; no operation is
//! reordered or elided. The match over [`ExprKind`] is exhaustive: a new
//! node kind fails to compile here until its resolution rule is written.

use std::collections::HashMap;

use syntax::{BinOpKind, Expr, ExprKind, Lit, LitKind, UnOpKind};

use crate::error::EvalError;
use crate::registry::OpRegistry;
use crate::value::{Value, num_from_literal};

pub(crate) struct EvalEnv<'a> {
    pub vars: &'a HashMap<String, Value>,
    pub positional: &'a [Value],
    pub registry: &'a OpRegistry,
}

pub(crate) fn eval_expr(expr: &Expr, env: &EvalEnv<'_>) -> Result<Value, EvalError> {
    match &expr.kind {
        ExprKind::Lit(lit) => lit_value(lit),

        ExprKind::Ident(sym) => env
            .vars
            .get(&sym.text)
            .cloned()
            .ok_or_else(|| EvalError::UnboundVariable(sym.text.clone())),

        ExprKind::Positional(index) => {
            env.positional
                .get(*index as usize)
                .cloned()
                .ok_or(EvalError::PositionalOutOfRange {
                    index: *index,
                    supplied: env.positional.len(),
                })
        }

        ExprKind::List { items } => items
            .iter()
            .map(|item| eval_expr(item, env))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),

        ExprKind::Unary { op, expr } => {
            let value = eval_expr(expr, env)?;
            match op.node {
                UnOpKind::Neg => match value {
                    Value::Num(n) => n
                        .checked_neg()
                        .map(Value::Num)
                        .ok_or(EvalError::NumericOverflow),
                    other => Err(EvalError::InvalidNegation(other.type_tag())),
                },
            }
        }

        ExprKind::Binary { op, left, right } => {
            let lhs = eval_expr(left, env)?;
            let rhs = eval_expr(right, env)?;
            apply_binop(op.node, lhs, rhs)
        }

        ExprKind::Call { callee, args } => {
            let argv = args
                .iter()
                .map(|arg| eval_expr(arg, env))
                .collect::<Result<Vec<_>, _>>()?;
            env.registry.call(None, &callee.text, &argv)
        }

        ExprKind::MethodCall {
            receiver,
            method,
            args,
        } => {
            let receiver = eval_expr(receiver, env)?;
            let tag = receiver.type_tag();
            let mut argv = Vec::with_capacity(args.len() + 1);
            argv.push(receiver);
            for arg in args {
                argv.push(eval_expr(arg, env)?);
            }
            env.registry.call(Some(tag), &method.text, &argv)
        }
    }
}

fn lit_value(lit: &Lit) -> Result<Value, EvalError> {
    match lit.kind {
        LitKind::Number => num_from_literal(&lit.symbol.text)
            .map(Value::Num)
            .ok_or_else(|| EvalError::LiteralOutOfRange(lit.symbol.text.clone())),
        LitKind::String => Ok(Value::Str(lit.symbol.text.clone())),
    }
}

fn apply_binop(op: BinOpKind, lhs: Value, rhs: Value) -> Result<Value, EvalError> {
    let (Value::Num(a), Value::Num(b)) = (&lhs, &rhs) else {
        return Err(EvalError::InvalidOperands {
            op: op.as_str(),
            lhs: lhs.type_tag(),
            rhs: rhs.type_tag(),
        });
    };
    let (a, b) = (*a, *b);

    let result = match op {
        BinOpKind::Plus => a.checked_add(b),
        BinOpKind::Minus => a.checked_sub(b),
        BinOpKind::Star => a.checked_mul(b),
        BinOpKind::Slash => {
            if b.is_zero() {
                return Err(EvalError::DivisionByZero);
            }
            a.checked_div(b)
        }
    };

    result.map(Value::Num).ok_or(EvalError::NumericOverflow)
}
