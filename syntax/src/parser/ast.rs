use crate::lexer::{Lit, Span, Spanned, Symbol};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
}

impl BinOpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOpKind::Plus => "+",
            BinOpKind::Minus => "-",
            BinOpKind::Star => "*",
            BinOpKind::Slash => "/",
        }
    }
}

pub type BinOp = Spanned<BinOpKind>;

/// Returns the Pratt binding power for an infix operator.
///
/// Larger numbers bind tighter. All binary operators here are left-associative
/// (`a - b - c` parses as `(a - b) - c`).
pub fn infix_binding_power(op: BinOpKind) -> (u8, u8) {
    use BinOpKind::*;

    // Return (left_bp, right_bp)
    // Left-associative: (p, p+1)
    match op {
        Plus | Minus => (1, 2),
        Star | Slash => (3, 4),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOpKind {
    /// `-`
    Neg,
}

impl UnOpKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UnOpKind::Neg => "-",
        }
    }
}

pub type UnOp = Spanned<UnOpKind>;

/// Returns the Pratt binding power for a prefix operator.
///
/// Unary minus binds tighter than every binary operator: `-2 * 3` parses as
/// `(-2) * 3`. Call and member-call postfixes bind tighter still; they are
/// handled by the postfix loop, not by binding power.
pub fn prefix_binding_power(op: UnOpKind) -> u8 {
    match op {
        UnOpKind::Neg => 5,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expr {
    pub span: Span,
    pub kind: ExprKind,
}

/// The closed set of expression node kinds.
///
/// Every traversal over this enum (evaluation, free-variable collection,
/// pretty printing) matches exhaustively with no catch-all arm, so adding a
/// variant is a compile-time obligation to update each of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind {
    /// Constant number or string literal.
    Lit(Lit),
    /// Free variable reference; the name is the context binding key.
    Ident(Symbol),
    /// Positional argument marker `@N`, resolved from the positional
    /// argument list at evaluation time.
    Positional(u32),
    /// Array literal `[a, b, ...]`.
    List {
        items: Vec<Expr>,
    },
    /// Free function call `callee(args...)`.
    Call {
        callee: Symbol,
        args: Vec<Expr>,
    },
    /// Named operation on a receiver value: `receiver.method(args...)`.
    MethodCall {
        receiver: Box<Expr>,
        method: Symbol,
        args: Vec<Expr>,
    },
    Unary {
        op: UnOp,
        expr: Box<Expr>,
    },
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}
