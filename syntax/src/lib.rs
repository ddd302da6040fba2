//! Expression front-end.
//!
//! Pipeline: lex → parse → {free-variable collection, evaluation (in the
//! `engine` crate)}. All spans are UTF-8 byte offsets into the original
//! source, using `[start, end)`.
//!
//! The grammar covers arithmetic over named variables (`+ - * /`, unary
//! minus, parentheses), free function calls `f(args...)`, member calls
//! `receiver.method(args...)`, array literals `[a, b]`, number and string
//! literals, and positional argument markers `@0`, `@1`, ...

use tracing::trace;

mod lexer;
mod parser;
mod tests;
mod vars;

use parser::Parser;

/// Parses `text` into an AST, or reports the first syntax error.
///
/// The parser establishes structure only; name resolution and typing happen
/// at evaluation time.
pub fn parse(text: &str) -> Result<Expr, ParseError> {
    trace!(text, "parsing expression");
    let tokens = lexer::lex(text)?;
    let mut parser = Parser::new(tokens);
    let expr = parser.parse_expr()?;
    parser.expect_eof()?;
    Ok(expr)
}

pub use lexer::{LexError, Lit, LitKind, Span, Spanned, Symbol, Token, TokenKind, lex};
pub use parser::ParseError;
pub use parser::ast;
pub use parser::ast::{BinOp, BinOpKind, Expr, ExprKind, UnOp, UnOpKind};
pub use vars::collect_variables;
