use thiserror::Error;

mod token;

pub use token::{Lit, LitKind, Span, Spanned, Symbol, Token, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("unexpected char '{ch}' at byte {}", .span.start)]
    UnexpectedChar { ch: char, span: Span },
    #[error("unterminated string literal starting at byte {}", .span.start)]
    UnterminatedString { span: Span },
    #[error("expected an index after '@' at byte {}", .span.start)]
    InvalidPositional { span: Span },
}

/// Lex the input into tokens.
///
/// - Numbers: decimal literals, integer (`12`) or fractional (`3.14`). A `.` only
///   continues a number when the next char is a digit, so `1.floor()` lexes as
///   `1` `.` `floor` `(` `)`.
/// - Strings: double-quoted, no escapes.
/// - Identifiers: ASCII letters/digits/`_`, not starting with a digit.
/// - Positional markers: `@` followed by ASCII digits.
pub fn lex(input: &str) -> Result<Vec<Token>, LexError> {
    let mut tokens = Vec::new();
    let mut iter = input.char_indices().peekable();

    while let Some((start, ch)) = iter.next() {
        if ch.is_whitespace() {
            continue;
        }

        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,

            '.' => TokenKind::Dot,
            ',' => TokenKind::Comma,
            '(' => TokenKind::OpenParen,
            ')' => TokenKind::CloseParen,
            '[' => TokenKind::OpenBracket,
            ']' => TokenKind::CloseBracket,

            '"' => {
                // Read string until next quote (no escapes).
                let mut end: Option<usize> = None;
                for (i, c) in iter.by_ref() {
                    if c == '"' {
                        end = Some(i + 1);
                        break;
                    }
                }

                let end = end.ok_or(LexError::UnterminatedString {
                    span: Span::new(start as u32, input.len() as u32),
                })?;

                tokens.push(Token {
                    kind: TokenKind::Literal(Lit {
                        kind: LitKind::String,
                        // Keep only the contents, not the quotes.
                        symbol: Symbol::new(&input[start + 1..end - 1]),
                    }),
                    span: Span::new(start as u32, end as u32),
                });
                continue;
            }

            '@' => {
                let mut end = start + 1;
                while let Some(&(i, c)) = iter.peek() {
                    if c.is_ascii_digit() {
                        iter.next();
                        end = i + 1;
                    } else {
                        break;
                    }
                }

                let digits = &input[start + 1..end];
                let index: u32 = digits.parse().map_err(|_| LexError::InvalidPositional {
                    span: Span::new(start as u32, end as u32),
                })?;

                tokens.push(Token {
                    kind: TokenKind::Positional(index),
                    span: Span::new(start as u32, end as u32),
                });
                continue;
            }

            c if c.is_ascii_digit() => {
                let mut end = start + 1;
                while let Some(&(i, c2)) = iter.peek() {
                    if c2.is_ascii_digit() {
                        iter.next();
                        end = i + 1;
                    } else {
                        break;
                    }
                }

                // A fraction part starts only when '.' is immediately followed by a
                // digit; otherwise the dot belongs to a member call.
                if matches!(iter.peek(), Some((_, '.'))) {
                    let mut ahead = iter.clone();
                    ahead.next(); // '.'
                    if matches!(ahead.peek(), Some((_, c2)) if c2.is_ascii_digit()) {
                        let (dot, _) = iter.next().unwrap();
                        end = dot + 1;
                        while let Some(&(i, c2)) = iter.peek() {
                            if c2.is_ascii_digit() {
                                iter.next();
                                end = i + 1;
                            } else {
                                break;
                            }
                        }
                    }
                }

                tokens.push(Token {
                    kind: TokenKind::Literal(Lit {
                        kind: LitKind::Number,
                        symbol: Symbol::new(&input[start..end]),
                    }),
                    span: Span::new(start as u32, end as u32),
                });
                continue;
            }

            c if is_ident_start(c) => {
                let mut end = start + c.len_utf8();
                let mut ident = String::new();
                ident.push(c);

                while let Some(&(i, c2)) = iter.peek() {
                    if is_ident_continue(c2) {
                        ident.push(c2);
                        iter.next();
                        end = i + c2.len_utf8();
                    } else {
                        break;
                    }
                }

                tokens.push(Token {
                    kind: TokenKind::Ident(Symbol { text: ident }),
                    span: Span::new(start as u32, end as u32),
                });
                continue;
            }

            _ => {
                return Err(LexError::UnexpectedChar {
                    ch,
                    span: Span::new(start as u32, (start + ch.len_utf8()) as u32),
                });
            }
        };

        tokens.push(Token {
            kind,
            span: Span::new(start as u32, (start + ch.len_utf8()) as u32),
        });
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        span: Span::new(input.len() as u32, input.len() as u32),
    });

    Ok(tokens)
}

fn is_ident_start(c: char) -> bool {
    c == '_' || c.is_ascii_alphabetic()
}

fn is_ident_continue(c: char) -> bool {
    c == '_' || c.is_ascii_alphanumeric()
}
