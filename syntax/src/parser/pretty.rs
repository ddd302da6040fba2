use super::ast::{Expr, ExprKind, infix_binding_power, prefix_binding_power};
use crate::lexer::LitKind;

/// Binding power used for call/member-call receivers: tighter than every
/// operator, so operator receivers get parenthesized.
const POSTFIX_BP: u8 = 6;

impl Expr {
    /// Renders the expression back to minimal surface syntax, inserting
    /// parentheses only where precedence demands.
    pub fn pretty(&self) -> String {
        self.pretty_with_prec(0)
    }

    fn pretty_with_prec(&self, parent_prec: u8) -> String {
        match &self.kind {
            ExprKind::Ident(sym) => sym.text.clone(),
            ExprKind::Lit(lit) => match lit.kind {
                LitKind::Number => lit.symbol.text.clone(),
                LitKind::String => escape_string_for_pretty(&lit.symbol.text),
            },
            ExprKind::Positional(index) => format!("@{index}"),
            ExprKind::List { items } => {
                let mut s = String::new();
                s.push('[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        s.push_str(", ");
                    }
                    s.push_str(&item.pretty_with_prec(0));
                }
                s.push(']');
                s
            }
            ExprKind::Call { callee, args } => {
                let mut s = String::new();
                s.push_str(&callee.text);
                push_arg_list(&mut s, args);
                s
            }
            ExprKind::MethodCall {
                receiver,
                method,
                args,
            } => {
                let mut s = receiver.pretty_with_prec(POSTFIX_BP);
                s.push('.');
                s.push_str(&method.text);
                push_arg_list(&mut s, args);
                s
            }
            ExprKind::Unary { op, expr } => {
                let inner = expr.pretty_with_prec(prefix_binding_power(op.node));
                format!("{}{}", op.node.as_str(), inner)
            }
            ExprKind::Binary { op, left, right } => {
                let (l_bp, r_bp) = infix_binding_power(op.node);
                let this_prec = l_bp;

                let l = left.pretty_with_prec(l_bp);
                let r = right.pretty_with_prec(r_bp);

                let combined = format!("{} {} {}", l, op.node.as_str(), r);

                if this_prec < parent_prec {
                    format!("({})", combined)
                } else {
                    combined
                }
            }
        }
    }
}

fn push_arg_list(s: &mut String, args: &[Expr]) {
    s.push('(');
    for (i, a) in args.iter().enumerate() {
        if i > 0 {
            s.push_str(", ");
        }
        s.push_str(&a.pretty_with_prec(0));
    }
    s.push(')');
}

fn escape_string_for_pretty(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            _ => out.push(ch),
        }
    }
    out.push('"');
    out
}
