//! Native functions bound in the base environment.
//!
//! Operators are ordinary builtins named by their symbol, so `a + b` is a
//! call to `` `+` ``. Most builtins take their actuals unresolved; the few
//! with optional named parameters declare a [`ParamResolver`].
//!
//! [`ParamResolver`]: crate::ParamResolver

mod access;
mod arith;
mod io;
mod reflect;
mod vectors;

pub(crate) use arith::condition_scalar;

use rho_vector::{Vector, VectorKind};

use crate::errors::{invalid_argument_type, missing_argument, EvalError};
use crate::interpreter::CallContext;
use crate::registry::PackageScope;
use crate::resolver::Args;
use crate::Value;

pub(crate) type BuiltinResult = Result<Value, EvalError>;

pub(crate) fn register(scope: &mut PackageScope<'_>) {
    arith::register(scope);
    vectors::register(scope);
    access::register(scope);
    io::register(scope);
    reflect::register(scope);
}

/// Vector view of an operand. `NULL` is an empty logical vector.
pub(crate) fn operand(value: &Value) -> Result<Vector, EvalError> {
    match value {
        Value::Vector(v) => Ok(v.clone()),
        Value::Null => Ok(Vector::empty(VectorKind::Logical)),
        other => Err(EvalError::new(format!(
            "invalid argument of type '{}'",
            other.type_name()
        ))),
    }
}

/// The `i`th actual.
pub(crate) fn nth<'a>(args: &'a Args, i: usize, param: &str) -> Result<&'a Value, EvalError> {
    args.get(i).ok_or_else(|| missing_argument(param))
}

/// A resolved parameter the resolver guarantees.
pub(crate) fn param<'a>(
    ctx: &CallContext<'_>,
    args: &'a Args,
    name: &str,
) -> Result<&'a Value, EvalError> {
    ctx.arg(args, name).ok_or_else(|| missing_argument(name))
}

/// First element of a vector argument as a number.
pub(crate) fn scalar(value: &Value, name: &str) -> Result<f64, EvalError> {
    value
        .as_vector()
        .and_then(Vector::first_f64)
        .ok_or_else(|| invalid_argument_type(name))
}

/// First element of a vector argument as a string.
pub(crate) fn text(value: &Value, name: &str) -> Result<String, EvalError> {
    value
        .as_vector()
        .and_then(Vector::first_string)
        .ok_or_else(|| invalid_argument_type(name))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
