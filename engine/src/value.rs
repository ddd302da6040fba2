//! Runtime values and numeric promotion.
//!
//! There is one logical number type with two representations: `Int` for
//! exact machine integers and `Dec` for exact high-precision decimals.
//! Arithmetic picks the narrowest representation that holds the exact
//! result; binary floating point is never involved.

use std::fmt;

use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy)]
pub enum Num {
    Int(i64),
    Dec(Decimal),
}

impl Num {
    pub fn is_zero(self) -> bool {
        match self {
            Num::Int(i) => i == 0,
            Num::Dec(d) => d.is_zero(),
        }
    }

    pub fn to_decimal(self) -> Decimal {
        match self {
            Num::Int(i) => Decimal::from(i),
            Num::Dec(d) => d,
        }
    }

    /// `Int + Int` stays `Int` unless it overflows `i64`, in which case the
    /// sum is carried exactly in decimal. Any `Dec` operand promotes the
    /// whole operation to decimal. `None` means the decimal range itself
    /// overflowed.
    pub fn checked_add(self, rhs: Num) -> Option<Num> {
        match (self, rhs) {
            (Num::Int(a), Num::Int(b)) => match a.checked_add(b) {
                Some(n) => Some(Num::Int(n)),
                None => Decimal::from(a).checked_add(Decimal::from(b)).map(Num::Dec),
            },
            _ => self
                .to_decimal()
                .checked_add(rhs.to_decimal())
                .map(Num::Dec),
        }
    }

    pub fn checked_sub(self, rhs: Num) -> Option<Num> {
        match (self, rhs) {
            (Num::Int(a), Num::Int(b)) => match a.checked_sub(b) {
                Some(n) => Some(Num::Int(n)),
                None => Decimal::from(a).checked_sub(Decimal::from(b)).map(Num::Dec),
            },
            _ => self
                .to_decimal()
                .checked_sub(rhs.to_decimal())
                .map(Num::Dec),
        }
    }

    pub fn checked_mul(self, rhs: Num) -> Option<Num> {
        match (self, rhs) {
            (Num::Int(a), Num::Int(b)) => match a.checked_mul(b) {
                Some(n) => Some(Num::Int(n)),
                None => Decimal::from(a).checked_mul(Decimal::from(b)).map(Num::Dec),
            },
            _ => self
                .to_decimal()
                .checked_mul(rhs.to_decimal())
                .map(Num::Dec),
        }
    }

    /// Division never truncates: `210 / 2` stays `Int(105)`, `7 / 2`
    /// promotes to `Dec(3.5)`. Callers must reject a zero divisor first.
    pub fn checked_div(self, rhs: Num) -> Option<Num> {
        if let (Num::Int(a), Num::Int(b)) = (self, rhs) {
            // checked_rem is None for i64::MIN % -1; that quotient overflows
            // i64 anyway and falls through to the decimal path.
            if let (Some(0), Some(q)) = (a.checked_rem(b), a.checked_div(b)) {
                return Some(Num::Int(q));
            }
        }
        self.to_decimal()
            .checked_div(rhs.to_decimal())
            .map(Num::Dec)
    }

    pub fn checked_neg(self) -> Option<Num> {
        match self {
            Num::Int(i) => match i.checked_neg() {
                Some(n) => Some(Num::Int(n)),
                None => Some(Num::Dec(-Decimal::from(i))),
            },
            Num::Dec(d) => Some(Num::Dec(-d)),
        }
    }
}

/// Numeric equality across representations: `Int(105)` equals `Dec(105.0)`.
impl PartialEq for Num {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Num::Int(a), Num::Int(b)) => a == b,
            _ => self.to_decimal() == other.to_decimal(),
        }
    }
}

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Num::Int(i) => write!(f, "{i}"),
            Num::Dec(d) => write!(f, "{d}"),
        }
    }
}

/// Runtime type of a [`Value`], the dispatch key component for the
/// operation registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeTag {
    Number,
    Str,
    Bool,
    List,
}

impl TypeTag {
    pub fn as_str(self) -> &'static str {
        match self {
            TypeTag::Number => "number",
            TypeTag::Str => "string",
            TypeTag::Bool => "boolean",
            TypeTag::List => "list",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dynamically typed evaluation result or context entry.
///
/// Booleans have no literal syntax; they come from predicate operations
/// (`startsWith`, `contains`, `includes`) or from the host's context.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Num(Num),
    Str(String),
    Bool(bool),
    List(Vec<Value>),
}

impl Value {
    pub fn type_tag(&self) -> TypeTag {
        match self {
            Value::Num(_) => TypeTag::Number,
            Value::Str(_) => TypeTag::Str,
            Value::Bool(_) => TypeTag::Bool,
            Value::List(_) => TypeTag::List,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Num(n) => write!(f, "{n}"),
            Value::Str(s) => f.write_str(s),
            Value::Bool(b) => write!(f, "{b}"),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<Num> for Value {
    fn from(n: Num) -> Self {
        Value::Num(n)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Num(Num::Int(i))
    }
}

impl From<Decimal> for Value {
    fn from(d: Decimal) -> Self {
        Value::Num(Num::Dec(d))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

/// Converts number literal text to the narrowest representation: integral
/// text that fits `i64` becomes `Int`, everything else parses as an exact
/// decimal. `None` when the text exceeds the decimal range.
pub(crate) fn num_from_literal(text: &str) -> Option<Num> {
    if !text.contains('.') {
        if let Ok(i) = text.parse::<i64>() {
            return Some(Num::Int(i));
        }
    }
    text.parse::<Decimal>().ok().map(Num::Dec)
}
