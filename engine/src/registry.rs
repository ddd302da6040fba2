//! Operation registry.
//!
//! Named operations dispatch through an explicit host-populated table
//! keyed by `(receiver type, name, arity)`; the evaluator never inspects a
//! receiver beyond its [`TypeTag`]. Free functions register without a
//! receiver. Method callables receive the receiver value prepended to the
//! argument slice, so `receiver.method(a, b)` runs as `method(receiver, a, b)`.

use std::collections::HashMap;

use crate::error::EvalError;
use crate::value::{TypeTag, Value};

pub type OpFn = Box<dyn Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync>;

/// Accepted argument count for one registered operation. Arity counts the
/// parenthesized arguments only; the receiver of a method is not counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    /// Variadic: `n` or more arguments (`sum`, `min`, `max`).
    AtLeast(usize),
}

impl Arity {
    fn accepts(self, n: usize) -> bool {
        match self {
            Arity::Exact(k) => n == k,
            Arity::AtLeast(k) => n >= k,
        }
    }
}

struct OpImpl {
    arity: Arity,
    run: OpFn,
}

#[derive(Default)]
pub struct OpRegistry {
    ops: HashMap<Option<TypeTag>, HashMap<String, Vec<OpImpl>>>,
}

impl OpRegistry {
    /// An empty registry: every call fails until the host registers
    /// operations.
    pub fn new() -> Self {
        OpRegistry::default()
    }

    /// A registry pre-loaded with the builtin operations.
    pub fn with_builtins() -> Self {
        let mut registry = OpRegistry::new();
        crate::builtins::install(&mut registry);
        registry
    }

    /// Registers a free function `name(args...)`.
    pub fn register_function(
        &mut self,
        name: impl Into<String>,
        arity: Arity,
        run: impl Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync + 'static,
    ) {
        self.register(None, name, arity, run);
    }

    /// Registers `receiver.name(args...)` on values of type `receiver`.
    /// The callable receives the receiver as its first slice element.
    pub fn register_method(
        &mut self,
        receiver: TypeTag,
        name: impl Into<String>,
        arity: Arity,
        run: impl Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync + 'static,
    ) {
        self.register(Some(receiver), name, arity, run);
    }

    fn register(
        &mut self,
        receiver: Option<TypeTag>,
        name: impl Into<String>,
        arity: Arity,
        run: impl Fn(&[Value]) -> Result<Value, EvalError> + Send + Sync + 'static,
    ) {
        self.ops
            .entry(receiver)
            .or_default()
            .entry(name.into())
            .or_default()
            .push(OpImpl {
                arity,
                run: Box::new(run),
            });
    }

    /// Resolves and invokes an operation. For method calls, `args[0]` is the
    /// receiver and `receiver` its type tag.
    ///
    /// Resolution failures are distinguished: a name with no entry at all is
    /// `UnknownOperation`/`UnknownFunction`; a known name where no
    /// registration accepts the argument count is `ArgumentMismatch`.
    pub fn call(
        &self,
        receiver: Option<TypeTag>,
        name: &str,
        args: &[Value],
    ) -> Result<Value, EvalError> {
        let impls = self
            .ops
            .get(&receiver)
            .and_then(|by_name| by_name.get(name))
            .ok_or_else(|| match receiver {
                Some(tag) => EvalError::UnknownOperation {
                    receiver: tag,
                    name: name.to_string(),
                },
                None => EvalError::UnknownFunction {
                    name: name.to_string(),
                },
            })?;

        let supplied = if receiver.is_some() {
            args.len() - 1
        } else {
            args.len()
        };

        let op = impls
            .iter()
            .find(|op| op.arity.accepts(supplied))
            .ok_or_else(|| EvalError::ArgumentMismatch {
                name: name.to_string(),
                detail: arity_detail(impls, supplied),
            })?;

        (op.run)(args)
    }
}

fn arity_detail(impls: &[OpImpl], supplied: usize) -> String {
    let expected = impls
        .iter()
        .map(|op| match op.arity {
            Arity::Exact(n) => n.to_string(),
            Arity::AtLeast(n) => format!("at least {n}"),
        })
        .collect::<Vec<_>>()
        .join(" or ");
    format!("expected {expected} argument(s), got {supplied}")
}
