//! Free-variable collection.
//!
//! A free variable is a name the host must supply through the variable
//! context before evaluation. Collection is a pure traversal: no context is
//! needed and it is total over any well-formed AST.

use std::collections::HashSet;

use crate::parser::ast::{Expr, ExprKind};

/// Collects the free variable names referenced by `expr`, in first-occurrence
/// order, each name reported once.
///
/// Operation names never count: in `a + b.dupel(c)` the variables are
/// `["a", "b", "c"]` — `dupel` is a method name, not a binding key. Literals
/// and positional markers (`@N`) contribute nothing.
pub fn collect_variables(expr: &Expr) -> Vec<String> {
    let mut names = Vec::new();
    let mut seen = HashSet::new();
    collect_into(expr, &mut names, &mut seen);
    names
}

// Exhaustive over ExprKind: a new node kind fails to compile here until its
// traversal rule is written down.
fn collect_into(expr: &Expr, names: &mut Vec<String>, seen: &mut HashSet<String>) {
    match &expr.kind {
        ExprKind::Lit(_) | ExprKind::Positional(_) => {}
        ExprKind::Ident(sym) => {
            if seen.insert(sym.text.clone()) {
                names.push(sym.text.clone());
            }
        }
        ExprKind::List { items } => {
            for item in items {
                collect_into(item, names, seen);
            }
        }
        ExprKind::Call { callee: _, args } => {
            for arg in args {
                collect_into(arg, names, seen);
            }
        }
        ExprKind::MethodCall {
            receiver,
            method: _,
            args,
        } => {
            collect_into(receiver, names, seen);
            for arg in args {
                collect_into(arg, names, seen);
            }
        }
        ExprKind::Unary { op: _, expr } => collect_into(expr, names, seen),
        ExprKind::Binary {
            op: _,
            left,
            right,
        } => {
            collect_into(left, names, seen);
            collect_into(right, names, seen);
        }
    }
}
