//! Reflective access to environments and the call stack.
//!
//! Each builtin sees its own entry on top of the call stack, so the call it
//! was invoked from is entry `-1`.

use super::{nth, scalar, BuiltinResult};
use crate::errors::{call_stack_index, EvalError};
use crate::interpreter::CallContext;
use crate::registry::PackageScope;
use crate::resolver::Args;
use crate::Value;

pub(super) fn register(scope: &mut PackageScope<'_>) {
    scope.add_builtin("environment", environment, None);
    scope.add_builtin("parent.frame", parent_frame, None);
    scope.add_builtin("sys.call", sys_call, None);
    scope.add_builtin("sys.function", sys_function, None);
    scope.add_builtin("environmentName", environment_name, None);
    scope.add_builtin("new.env", new_env, None);
}

/// `environment(fun = NULL)`: the calling environment, or the defining
/// environment of a closure.
fn environment(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    match args.get(0) {
        None | Some(Value::Null) => Ok(Value::Env(ctx.call_stack().top().frame().clone())),
        Some(Value::Closure(closure)) => Ok(Value::Env(closure.env.clone())),
        Some(Value::Builtin(_)) => Ok(Value::Null),
        Some(_) => Err(EvalError::new("argument is not a function")),
    }
}

/// `parent.frame(n = 1)`. Counting past the outermost call gives the
/// global environment.
fn parent_frame(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let n = match args.get(0) {
        Some(n) => scalar(n, "n")?,
        None => 1.0,
    };
    if n.is_nan() || n < 1.0 {
        return Err(EvalError::new("invalid 'n' value"));
    }
    let frame = ctx
        .call_stack()
        .get_entry((n as i64).saturating_neg())
        .ok()
        .and_then(|entry| entry.parent())
        .unwrap_or_else(|| ctx.global().clone());
    Ok(Value::Env(frame))
}

/// Stack index for `sys.call(which)`: 0 is the current call, positive
/// counts from the outermost, negative counts back from the current.
fn which_entry(args: &Args) -> Result<i64, EvalError> {
    let which = match args.get(0) {
        Some(which) => scalar(which, "which")? as i64,
        None => 0,
    };
    if which > 0 {
        return Ok(which);
    }
    which.checked_sub(1).ok_or_else(|| call_stack_index(which))
}

fn sys_call(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let entry = ctx.call_stack().get_entry(which_entry(&args)?)?;
    Ok(entry.call().cloned().map_or(Value::Null, Value::Lang))
}

fn sys_function(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let entry = ctx.call_stack().get_entry(which_entry(&args)?)?;
    Ok(entry.function().clone())
}

fn environment_name(_: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    match nth(&args, 0, "env")? {
        Value::Env(env) => Ok(Value::string(env.name().unwrap_or_default())),
        _ => Ok(Value::string("")),
    }
}

/// `new.env(parent)`: enclosed by `parent`, or by the calling environment.
fn new_env(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let parent = match args.get(0) {
        Some(Value::Env(env)) => env.clone(),
        Some(_) => return Err(EvalError::new("'enclos' must be an environment")),
        None => ctx.caller().clone(),
    };
    Ok(Value::Env(ctx.new_env(&parent)))
}
