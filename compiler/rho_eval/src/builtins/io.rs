//! Output, identity and error signalling.

use rho_ir::{deparse, format_number, quote_string};
use rho_vector::{format_numbers, Vector, VectorData};

use super::vectors::strings_of;
use super::{nth, text, BuiltinResult};
use crate::errors::{stop, EvalError};
use crate::interpreter::CallContext;
use crate::registry::PackageScope;
use crate::resolver::Args;
use crate::Value;

pub(super) fn register(scope: &mut PackageScope<'_>) {
    scope.add_builtin("cat", cat, None);
    scope.add_builtin("print", print, None);
    scope.add_builtin("identity", |_, args| Ok(nth(&args, 0, "x")?.clone()), None);
    scope.add_builtin("invisible", invisible, None);
    scope.add_builtin(
        "is.null",
        |_, args| Ok(Value::boolean(matches!(nth(&args, 0, "x")?, Value::Null))),
        None,
    );
    scope.add_builtin(
        "is.function",
        |_, args| Ok(Value::boolean(nth(&args, 0, "x")?.is_function())),
        None,
    );
    scope.add_builtin("stop", stop_call, None);
    scope.add_builtin("deparse", deparse_value, None);
}

/// `cat(..., sep = " ")`: numbers to seven significant digits, strings
/// unquoted, no trailing newline.
fn cat(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let sep_name = ctx.sym("sep");
    let mut sep = " ".to_owned();
    let mut pieces: Vec<String> = Vec::new();
    for (i, (name, value)) in args.items().iter().enumerate() {
        if *name == Some(sep_name) {
            sep = text(value, "sep")?;
            continue;
        }
        match value {
            Value::Vector(v) => match v.data() {
                VectorData::Numeric(xs) => pieces.extend(
                    xs.iter()
                        .map(|&x| format_numbers(&[x]).into_iter().next().unwrap_or_default()),
                ),
                _ => pieces.extend(v.as_strings()),
            },
            Value::Null => {}
            Value::List(_) => pieces.extend(strings_of(ctx, value)),
            other => {
                return Err(EvalError::new(format!(
                    "argument {} (type '{}') cannot be handled by 'cat'",
                    i + 1,
                    other.type_name()
                )))
            }
        }
    }
    ctx.print_handler().print(&pieces.join(&sep));
    ctx.set_invisible();
    Ok(Value::Null)
}

fn print(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let x = nth(&args, 0, "x")?;
    ctx.print_handler().println(&ctx.display(x));
    ctx.set_invisible();
    Ok(x.clone())
}

fn invisible(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    ctx.set_invisible();
    Ok(args.get(0).cloned().unwrap_or(Value::Null))
}

fn stop_call(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let ctx: &CallContext<'_> = ctx;
    let message: String = args
        .items()
        .iter()
        .flat_map(|(_, value)| strings_of(ctx, value))
        .collect();
    Err(stop(message))
}

fn deparse_value(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let source = match nth(&args, 0, "expr")? {
        Value::Lang(lang) => deparse(&lang.arena, ctx.interner(), lang.expr),
        Value::Closure(closure) => deparse(&closure.arena, ctx.interner(), closure.def),
        Value::Vector(v) => deparse_vector(v),
        Value::Null => "NULL".to_owned(),
        other => ctx.display(other),
    };
    Ok(Value::string(source))
}

/// Source text that rebuilds `v`, without attributes.
fn deparse_vector(v: &Vector) -> String {
    let elements: Vec<String> = match v.data() {
        VectorData::Numeric(xs) => xs
            .iter()
            .map(|&x| {
                let mut out = String::new();
                format_number(x, &mut out);
                out
            })
            .collect(),
        VectorData::Logical(_) => v.as_strings(),
        _ => v
            .as_strings()
            .iter()
            .map(|s| {
                let mut out = String::new();
                quote_string(s, &mut out);
                out
            })
            .collect(),
    };
    match elements.as_slice() {
        [] => format!("{}(0)", v.kind().type_name()),
        [single] => single.clone(),
        _ => format!("c({})", elements.join(", ")),
    }
}
