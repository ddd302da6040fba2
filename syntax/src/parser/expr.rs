//! Expression parsing (Pratt parser).
//!
//! Produces an AST or the first syntax error. Spans are UTF-8 byte offsets
//! with half-open semantics `[start, end)`.

use super::ast::{
    BinOp, BinOpKind, Expr, ExprKind, UnOp, UnOpKind, infix_binding_power, prefix_binding_power,
};
use super::{ParseError, Parser};
use crate::lexer::{Span, TokenKind};

impl Parser {
    /// Parses an expression.
    ///
    /// Supported forms:
    /// - literals: `1`, `3.14`, `"hello"`, and list literals: `[expr, ...]`
    /// - identifiers: `x`, `y`, `z`
    /// - positional markers: `@0`, `@1`, ...
    /// - grouping (parentheses): `(expr)`
    /// - unary minus: `-expr`
    /// - binary: `+ - * /`
    /// - calls `ident(arg1, ...)` and member calls `receiver.method(arg1, ...)`
    ///
    /// ```text
    /// `a + b * c` parses as `+` with rhs `*`
    /// `a - b - c` parses as `(a - b) - c`   // left-associative
    /// `-2 * 3` parses as `(-2) * 3`          // unary binds tighter
    /// `a.f(1).g(2)` chains left-to-right
    /// ```
    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.parse_expr_assoc_with(0)
    }

    /// Parses an associative expression with operators of at least `min_bp` precedence.
    fn parse_expr_assoc_with(&mut self, min_bp: u8) -> Result<Expr, ParseError> {
        let mut lhs = self.parse_expr_prefix()?;

        loop {
            let Some(op) = self.peek_binop_kind() else {
                break;
            };

            let (l_bp, r_bp) = infix_binding_power(op);
            if l_bp < min_bp {
                break;
            }

            let op_tok = self.bump(); // operator token

            if !self.cur().can_begin_expr() {
                return Err(self.unexpected(format!("expression after `{}`", op.as_str())));
            }
            let rhs = self.parse_expr_assoc_with(r_bp)?;

            let span = lhs.span.to(rhs.span);
            lhs = self.mk_expr(
                span,
                ExprKind::Binary {
                    op: BinOp {
                        node: op,
                        span: op_tok.span,
                    },
                    left: Box::new(lhs),
                    right: Box::new(rhs),
                },
            );
        }

        Ok(lhs)
    }

    /// Parses a prefix-unary-operator expr.
    /// Note: when adding new unary operators, don't forget to adjust
    /// `Token::can_begin_expr()`.
    fn parse_expr_prefix(&mut self) -> Result<Expr, ParseError> {
        match self.cur().kind {
            // `-expr`
            TokenKind::Minus => self.parse_expr_unary(UnOpKind::Neg),
            // Parses `a.b()` or `a(13)` or just `a`.
            _ => {
                let base = self.parse_expr_primary()?;
                self.parse_expr_dot_or_call(base)
            }
        }
    }

    fn parse_expr_unary(&mut self, op: UnOpKind) -> Result<Expr, ParseError> {
        let tok = self.bump();
        if !self.cur().can_begin_expr() {
            return Err(self.unexpected(format!("expression after `{}`", op.as_str())));
        }
        let expr = self.parse_expr_assoc_with(prefix_binding_power(op))?;
        let span = tok.span.to(expr.span);
        Ok(self.mk_expr(
            span,
            ExprKind::Unary {
                op: UnOp {
                    node: op,
                    span: tok.span,
                },
                expr: Box::new(expr),
            },
        ))
    }

    /// Postfix loop for call and member-call chains; both bind tighter than
    /// any operator, left-associatively.
    fn parse_expr_dot_or_call(&mut self, mut expr: Expr) -> Result<Expr, ParseError> {
        loop {
            if self.cur().kind == TokenKind::OpenParen {
                let start = expr.span.start;

                // Only an identifier can be called as a free function.
                let callee = match expr.kind {
                    ExprKind::Ident(sym) => sym,
                    _ => return Err(self.unexpected("call callee (identifier)")),
                };

                let (args, end) = self.parse_paren_arg_list()?;
                expr = self.mk_expr(Span::new(start, end), ExprKind::Call { callee, args });
                continue;
            }

            if self.cur().kind == TokenKind::Dot {
                self.bump(); // '.'

                let method_tok = self.expect_ident()?;
                let method = match method_tok.kind {
                    TokenKind::Ident(sym) => sym,
                    _ => unreachable!(),
                };

                if self.cur().kind != TokenKind::OpenParen {
                    return Err(
                        self.unexpected("`(` after member name (member access is not supported)")
                    );
                }

                let (args, end) = self.parse_paren_arg_list()?;
                let receiver = expr;
                let span = Span::new(receiver.span.start, end);
                expr = self.mk_expr(
                    span,
                    ExprKind::MethodCall {
                        receiver: Box::new(receiver),
                        method,
                        args,
                    },
                );
                continue;
            }

            break;
        }

        Ok(expr)
    }

    fn parse_paren_arg_list(&mut self) -> Result<(Vec<Expr>, u32), ParseError> {
        self.bump(); // '('

        let mut args = Vec::new();
        if self.cur().kind != TokenKind::CloseParen {
            args.push(self.parse_expr_assoc_with(0)?);
            while self.cur().kind == TokenKind::Comma {
                self.bump(); // ','
                if !self.cur().can_begin_expr() {
                    return Err(self.unexpected("expression after `,`"));
                }
                args.push(self.parse_expr_assoc_with(0)?);
            }
        }

        self.expect_punct(TokenKind::CloseParen, "`)`")?;
        Ok((args, self.last_bumped_end()))
    }

    fn peek_binop_kind(&self) -> Option<BinOpKind> {
        match self.cur().kind {
            TokenKind::Plus => Some(BinOpKind::Plus),
            TokenKind::Minus => Some(BinOpKind::Minus),
            TokenKind::Star => Some(BinOpKind::Star),
            TokenKind::Slash => Some(BinOpKind::Slash),
            _ => None,
        }
    }

    /// Parses a primary expression: `a`, `1`, `"hello"`, `@0`, `(expr)`, `[expr, ...]`.
    fn parse_expr_primary(&mut self) -> Result<Expr, ParseError> {
        match self.cur().kind {
            TokenKind::Ident(_) => Ok(self.parse_ident()),
            TokenKind::Literal(_) => Ok(self.parse_literal()),
            TokenKind::Positional(_) => Ok(self.parse_positional()),
            TokenKind::OpenParen => self.parse_expr_parens(),
            TokenKind::OpenBracket => self.parse_list_literal(),
            _ => Err(self.unexpected("expression")),
        }
    }

    fn parse_ident(&mut self) -> Expr {
        let tok = self.bump(); // identifier

        let sym = match tok.kind {
            TokenKind::Ident(sym) => sym,
            _ => unreachable!(),
        };

        self.mk_expr(tok.span, ExprKind::Ident(sym))
    }

    fn parse_literal(&mut self) -> Expr {
        let tok = self.bump(); // number or string literal

        let lit = match tok.kind {
            TokenKind::Literal(lit) => lit,
            _ => unreachable!(),
        };

        self.mk_expr(tok.span, ExprKind::Lit(lit))
    }

    fn parse_positional(&mut self) -> Expr {
        let tok = self.bump(); // `@N`

        let index = match tok.kind {
            TokenKind::Positional(index) => index,
            _ => unreachable!(),
        };

        self.mk_expr(tok.span, ExprKind::Positional(index))
    }

    /// Parentheses only group; the inner expression stands on its own node.
    fn parse_expr_parens(&mut self) -> Result<Expr, ParseError> {
        self.bump(); // '('
        let inner = self.parse_expr_assoc_with(0)?;
        self.expect_punct(TokenKind::CloseParen, "`)`")?;
        Ok(inner)
    }

    /// Parse a list literal: `[expr, expr, ...]`.
    ///
    /// Trailing comma (`[1, 2,]`) is rejected: a list element is required
    /// after every comma.
    fn parse_list_literal(&mut self) -> Result<Expr, ParseError> {
        let lbrack = self.bump(); // '['
        let mut items = Vec::new();

        if self.cur().kind != TokenKind::CloseBracket {
            items.push(self.parse_expr_assoc_with(0)?);
            while self.cur().kind == TokenKind::Comma {
                self.bump(); // ','

                if self.cur().kind == TokenKind::CloseBracket {
                    return Err(self.unexpected(
                        "expression (trailing comma in list literal is not supported)",
                    ));
                }

                if !self.cur().can_begin_expr() {
                    return Err(self.unexpected("expression after `,` in list literal"));
                }

                items.push(self.parse_expr_assoc_with(0)?);
            }
        }

        self.expect_punct(TokenKind::CloseBracket, "`]`")?;
        let span = Span::new(lbrack.span.start, self.last_bumped_end());
        Ok(self.mk_expr(span, ExprKind::List { items }))
    }
}
