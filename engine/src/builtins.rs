//! Builtin operations.
//!
//! The default surface a host gets from [`OpRegistry::with_builtins`]:
//! math free functions, string methods, and list methods. Hosts extend or
//! replace this set through the registry.

use rust_decimal::{Decimal, MathematicalOps};

use crate::error::EvalError;
use crate::registry::{Arity, OpRegistry};
use crate::value::{Num, TypeTag, Value};

pub(crate) fn install(registry: &mut OpRegistry) {
    install_math(registry);
    install_string(registry);
    install_list(registry);
}

fn install_math(registry: &mut OpRegistry) {
    registry.register_function("sqrt", Arity::Exact(1), |args| {
        let n = num_arg("sqrt", args, 0)?;
        n.to_decimal()
            .sqrt()
            .map(|d| Value::Num(Num::Dec(d)))
            .ok_or_else(|| mismatch("sqrt", "square root of a negative number"))
    });

    registry.register_function("abs", Arity::Exact(1), |args| {
        let result = match num_arg("abs", args, 0)? {
            Num::Int(i) => match i.checked_abs() {
                Some(v) => Num::Int(v),
                None => Num::Dec(Decimal::from(i).abs()),
            },
            Num::Dec(d) => Num::Dec(d.abs()),
        };
        Ok(Value::Num(result))
    });

    registry.register_function("floor", Arity::Exact(1), |args| {
        let result = match num_arg("floor", args, 0)? {
            Num::Int(i) => Num::Int(i),
            Num::Dec(d) => Num::Dec(d.floor()),
        };
        Ok(Value::Num(result))
    });

    registry.register_function("ceil", Arity::Exact(1), |args| {
        let result = match num_arg("ceil", args, 0)? {
            Num::Int(i) => Num::Int(i),
            Num::Dec(d) => Num::Dec(d.ceil()),
        };
        Ok(Value::Num(result))
    });

    registry.register_function("round", Arity::Exact(1), |args| {
        let result = match num_arg("round", args, 0)? {
            Num::Int(i) => Num::Int(i),
            Num::Dec(d) => Num::Dec(d.round()),
        };
        Ok(Value::Num(result))
    });

    registry.register_function("round", Arity::Exact(2), |args| {
        let n = num_arg("round", args, 0)?;
        let places = match num_arg("round", args, 1)? {
            Num::Int(i) if (0..=28).contains(&i) => i as u32,
            other => {
                return Err(mismatch(
                    "round",
                    format!("expected an integer between 0 and 28 for places, got {other}"),
                ));
            }
        };
        Ok(Value::Num(Num::Dec(n.to_decimal().round_dp(places))))
    });

    registry.register_function("pow", Arity::Exact(2), |args| {
        let base = num_arg("pow", args, 0)?;
        let exp = num_arg("pow", args, 1)?;
        base.to_decimal()
            .checked_powd(exp.to_decimal())
            .map(|d| Value::Num(Num::Dec(d)))
            .ok_or(EvalError::NumericOverflow)
    });

    registry.register_function("min", Arity::AtLeast(1), |args| {
        let nums = num_spread("min", args)?;
        let mut best = nums[0];
        for n in &nums[1..] {
            if n.to_decimal() < best.to_decimal() {
                best = *n;
            }
        }
        Ok(Value::Num(best))
    });

    registry.register_function("max", Arity::AtLeast(1), |args| {
        let nums = num_spread("max", args)?;
        let mut best = nums[0];
        for n in &nums[1..] {
            if n.to_decimal() > best.to_decimal() {
                best = *n;
            }
        }
        Ok(Value::Num(best))
    });

    registry.register_function("sum", Arity::AtLeast(1), |args| {
        let nums = num_spread("sum", args)?;
        let mut total = Num::Int(0);
        for n in nums {
            total = total.checked_add(n).ok_or(EvalError::NumericOverflow)?;
        }
        Ok(Value::Num(total))
    });

    registry.register_function("pi", Arity::Exact(0), |_args| {
        Ok(Value::Num(Num::Dec(Decimal::PI)))
    });

    registry.register_function("e", Arity::Exact(0), |_args| {
        Ok(Value::Num(Num::Dec(Decimal::E)))
    });
}

fn install_string(registry: &mut OpRegistry) {
    registry.register_method(TypeTag::Str, "length", Arity::Exact(0), |args| {
        let s = str_arg("length", args, 0)?;
        Ok(Value::Num(Num::Int(s.chars().count() as i64)))
    });

    registry.register_method(TypeTag::Str, "upper", Arity::Exact(0), |args| {
        Ok(Value::Str(str_arg("upper", args, 0)?.to_uppercase()))
    });

    registry.register_method(TypeTag::Str, "lower", Arity::Exact(0), |args| {
        Ok(Value::Str(str_arg("lower", args, 0)?.to_lowercase()))
    });

    registry.register_method(TypeTag::Str, "contains", Arity::Exact(1), |args| {
        let s = str_arg("contains", args, 0)?;
        let needle = str_arg("contains", args, 1)?;
        Ok(Value::Bool(s.contains(needle)))
    });

    registry.register_method(TypeTag::Str, "startsWith", Arity::Exact(1), |args| {
        let s = str_arg("startsWith", args, 0)?;
        let prefix = str_arg("startsWith", args, 1)?;
        Ok(Value::Bool(s.starts_with(prefix)))
    });

    registry.register_method(TypeTag::Str, "endsWith", Arity::Exact(1), |args| {
        let s = str_arg("endsWith", args, 0)?;
        let suffix = str_arg("endsWith", args, 1)?;
        Ok(Value::Bool(s.ends_with(suffix)))
    });
}

fn install_list(registry: &mut OpRegistry) {
    registry.register_method(TypeTag::List, "length", Arity::Exact(0), |args| {
        let items = list_arg("length", args, 0)?;
        Ok(Value::Num(Num::Int(items.len() as i64)))
    });

    registry.register_method(TypeTag::List, "at", Arity::Exact(1), |args| {
        let items = list_arg("at", args, 0)?;
        let index = match num_arg("at", args, 1)? {
            Num::Int(i) if i >= 0 => i as usize,
            other => {
                return Err(mismatch(
                    "at",
                    format!("expected a non-negative integer index, got {other}"),
                ));
            }
        };
        items.get(index).cloned().ok_or_else(|| {
            mismatch(
                "at",
                format!("index {index} out of bounds (length {})", items.len()),
            )
        })
    });

    registry.register_method(TypeTag::List, "first", Arity::Exact(0), |args| {
        let items = list_arg("first", args, 0)?;
        items
            .first()
            .cloned()
            .ok_or_else(|| mismatch("first", "empty list"))
    });

    registry.register_method(TypeTag::List, "last", Arity::Exact(0), |args| {
        let items = list_arg("last", args, 0)?;
        items
            .last()
            .cloned()
            .ok_or_else(|| mismatch("last", "empty list"))
    });

    registry.register_method(TypeTag::List, "includes", Arity::Exact(1), |args| {
        let items = list_arg("includes", args, 0)?;
        Ok(Value::Bool(items.contains(&args[1])))
    });

    registry.register_method(TypeTag::List, "join", Arity::Exact(1), |args| {
        let items = list_arg("join", args, 0)?;
        let separator = str_arg("join", args, 1)?;
        let joined = items
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(separator);
        Ok(Value::Str(joined))
    });
}

fn mismatch(name: &str, detail: impl Into<String>) -> EvalError {
    EvalError::ArgumentMismatch {
        name: name.to_string(),
        detail: detail.into(),
    }
}

fn num_arg(name: &str, args: &[Value], index: usize) -> Result<Num, EvalError> {
    match &args[index] {
        Value::Num(n) => Ok(*n),
        other => Err(mismatch(
            name,
            format!("expected number, got {}", other.type_tag()),
        )),
    }
}

fn str_arg<'a>(name: &str, args: &'a [Value], index: usize) -> Result<&'a str, EvalError> {
    match &args[index] {
        Value::Str(s) => Ok(s),
        other => Err(mismatch(
            name,
            format!("expected string, got {}", other.type_tag()),
        )),
    }
}

fn list_arg<'a>(name: &str, args: &'a [Value], index: usize) -> Result<&'a [Value], EvalError> {
    match &args[index] {
        Value::List(items) => Ok(items),
        other => Err(mismatch(
            name,
            format!("expected list, got {}", other.type_tag()),
        )),
    }
}

/// Gathers the numeric arguments of a variadic operation; a single list
/// argument spreads its numeric elements (`sum([1, 2, 3])` = `sum(1, 2, 3)`).
fn num_spread(name: &str, args: &[Value]) -> Result<Vec<Num>, EvalError> {
    let values: &[Value] = match args {
        [Value::List(items)] => items,
        _ => args,
    };
    if values.is_empty() {
        return Err(mismatch(name, "expected at least 1 number"));
    }
    values
        .iter()
        .map(|v| match v {
            Value::Num(n) => Ok(*n),
            other => Err(mismatch(
                name,
                format!("expected number, got {}", other.type_tag()),
            )),
        })
        .collect()
}
