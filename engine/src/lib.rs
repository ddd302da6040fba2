//! Expression engine.
//!
//! Pipeline: text → [`parse`] → AST → {[`collect_variables`], [`evaluate`]
//! against a variable context and positional arguments}. The parse cache
//! memoizes text → shared AST between those two steps.
//!
//! The host supplies the variable context per call and owns the operation
//! surface: [`Engine::registry_mut`] registers free functions and methods
//! beyond the builtin set.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use thiserror::Error;
use tracing::debug;

mod builtins;
mod cache;
mod error;
mod eval;
mod registry;
mod tests;
mod value;

use eval::EvalEnv;

pub use cache::{CachePolicy, ParseCache};
pub use error::EvalError;
pub use registry::{Arity, OpFn, OpRegistry};
pub use syntax::{Expr, ExprKind, LexError, ParseError, Span, collect_variables, parse};
pub use value::{Num, TypeTag, Value};

/// Failure from the composite [`Engine::eval`] path: either the text does
/// not parse or the AST does not evaluate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

static DEFAULT_REGISTRY: LazyLock<OpRegistry> = LazyLock::new(OpRegistry::with_builtins);

/// Evaluates an already-parsed expression against the builtin operations.
///
/// The context maps case-sensitive variable names to values; positional
/// arguments resolve `@N` markers. Neither is retained beyond the call.
pub fn evaluate(
    expr: &Expr,
    vars: &HashMap<String, Value>,
    positional: &[Value],
) -> Result<Value, EvalError> {
    eval::eval_expr(expr, &EvalEnv {
        vars,
        positional,
        registry: &DEFAULT_REGISTRY,
    })
}

/// An expression engine: an operation registry plus an optional parse cache.
pub struct Engine {
    registry: OpRegistry,
    cache: Option<ParseCache>,
}

impl Engine {
    /// Builtin operations and an unbounded parse cache.
    pub fn new() -> Self {
        Self::with_cache_policy(CachePolicy::Unbounded)
    }

    pub fn with_cache_policy(policy: CachePolicy) -> Self {
        Engine {
            registry: OpRegistry::with_builtins(),
            cache: Some(ParseCache::new(policy)),
        }
    }

    /// No memoization: every parse yields a fresh, structurally-equal AST.
    pub fn without_cache() -> Self {
        Engine {
            registry: OpRegistry::with_builtins(),
            cache: None,
        }
    }

    /// Registration point for host functions and methods.
    pub fn registry_mut(&mut self) -> &mut OpRegistry {
        &mut self.registry
    }

    /// Parses `text` through the cache when one is configured. Cache hits
    /// return the identical shared AST, never a copy.
    pub fn parse(&self, text: &str) -> Result<Arc<Expr>, ParseError> {
        match &self.cache {
            Some(cache) => cache.get_or_parse(text),
            None => Ok(Arc::new(syntax::parse(text)?)),
        }
    }

    /// Evaluates an already-parsed expression with this engine's registry.
    pub fn evaluate(
        &self,
        expr: &Expr,
        vars: &HashMap<String, Value>,
        positional: &[Value],
    ) -> Result<Value, EvalError> {
        eval::eval_expr(expr, &EvalEnv {
            vars,
            positional,
            registry: &self.registry,
        })
    }

    /// The composite path: cache → parse → evaluate.
    pub fn eval(
        &self,
        text: &str,
        vars: &HashMap<String, Value>,
        positional: &[Value],
    ) -> Result<Value, Error> {
        debug!(text, "evaluating expression");
        let expr = self.parse(text)?;
        Ok(self.evaluate(&expr, vars, positional)?)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
