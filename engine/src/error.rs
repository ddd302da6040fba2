use thiserror::Error;

use crate::value::TypeTag;

/// Evaluation failure. Never swallowed, never defaulted: every failure
/// surfaces to the caller with the variable or operation name it concerns.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("unbound variable `{0}`")]
    UnboundVariable(String),
    #[error("positional argument @{index} out of range ({supplied} supplied)")]
    PositionalOutOfRange { index: u32, supplied: usize },
    #[error("unknown function `{name}`")]
    UnknownFunction { name: String },
    #[error("unknown operation `{name}` on {receiver}")]
    UnknownOperation { receiver: TypeTag, name: String },
    #[error("argument mismatch in `{name}`: {detail}")]
    ArgumentMismatch { name: String, detail: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("numeric overflow")]
    NumericOverflow,
    #[error("numeric literal `{0}` out of range")]
    LiteralOutOfRange(String),
    #[error("operator `{op}` is not defined for {lhs} and {rhs}")]
    InvalidOperands {
        op: &'static str,
        lhs: TypeTag,
        rhs: TypeTag,
    },
    #[error("cannot negate {0}")]
    InvalidNegation(TypeTag),
}
