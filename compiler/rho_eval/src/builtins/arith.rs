//! Operators and elementwise math.

use rho_vector::{arith, compare, logical, map1, not, Arith, Comparison, Logic, Mode, Vector, VectorKind};

use super::{nth, operand, param, BuiltinResult};
use crate::errors::EvalError;
use crate::interpreter::CallContext;
use crate::registry::PackageScope;
use crate::resolver::{Args, ParamResolver, TypeTags};
use crate::Value;

pub(super) fn register(scope: &mut PackageScope<'_>) {
    scope.add_builtin("+", |_, args| signed(Arith::Add, &args), None);
    scope.add_builtin("-", |_, args| signed(Arith::Sub, &args), None);
    scope.add_builtin("*", |_, args| binary(Arith::Mul, &args), None);
    scope.add_builtin("/", |_, args| binary(Arith::Div, &args), None);
    scope.add_builtin("^", |_, args| binary(Arith::Pow, &args), None);
    scope.add_builtin("%%", |_, args| binary(Arith::Mod, &args), None);
    scope.add_builtin("%/%", |_, args| binary(Arith::IntDiv, &args), None);

    scope.add_builtin("==", |_, args| comparison(Comparison::Eq, &args), None);
    scope.add_builtin("!=", |_, args| comparison(Comparison::Ne, &args), None);
    scope.add_builtin("<", |_, args| comparison(Comparison::Lt, &args), None);
    scope.add_builtin(">", |_, args| comparison(Comparison::Gt, &args), None);
    scope.add_builtin("<=", |_, args| comparison(Comparison::Le, &args), None);
    scope.add_builtin(">=", |_, args| comparison(Comparison::Ge, &args), None);

    scope.add_builtin("!", negate, None);
    scope.add_builtin("&", |_, args| elementwise(Logic::And, &args), None);
    scope.add_builtin("|", |_, args| elementwise(Logic::Or, &args), None);
    scope.add_builtin("&&", |_, args| short(Logic::And, &args), None);
    scope.add_builtin("||", |_, args| short(Logic::Or, &args), None);

    scope.add_builtin("sum", sum, None);
    scope.add_builtin("min", |_, args| extreme(&args, f64::INFINITY, f64::min), None);
    scope.add_builtin("max", |_, args| extreme(&args, f64::NEG_INFINITY, f64::max), None);
    scope.add_builtin("sqrt", |_, args| math(&args, f64::sqrt), None);
    scope.add_builtin("exp", |_, args| math(&args, f64::exp), None);
    scope.add_builtin("abs", |_, args| math(&args, f64::abs), None);
    scope.add_builtin(
        "log",
        log,
        Some(
            ParamResolver::builder()
                .required("x", TypeTags::NUMBER)
                .optional("base", TypeTags::NUMBER)
                .build(),
        ),
    );
}

fn operands(args: &Args) -> Result<(Vector, Vector), EvalError> {
    match args.items() {
        [(_, a), (_, b)] => Ok((operand(a)?, operand(b)?)),
        _ => Err(EvalError::new("operator needs two arguments")),
    }
}

fn binary(op: Arith, args: &Args) -> BuiltinResult {
    let (a, b) = operands(args)?;
    Ok(arith(op, &a, &b, Mode::Scalar)?.into())
}

/// `+` and `-` are also unary.
fn signed(op: Arith, args: &Args) -> BuiltinResult {
    if args.len() != 1 {
        return binary(op, args);
    }
    let x = operand(nth(args, 0, "x")?)?;
    let out = match op {
        Arith::Sub => map1(&x, |v| -v),
        _ => map1(&x, |v| v),
    };
    out.map(Value::from)
        .map_err(|_| EvalError::new("invalid argument to unary operator"))
}

fn comparison(op: Comparison, args: &Args) -> BuiltinResult {
    let (a, b) = operands(args)?;
    Ok(compare(op, &a, &b, Mode::Scalar)?.into())
}

fn negate(_: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let x = operand(nth(&args, 0, "x")?)?;
    Ok(not(&x)?.into())
}

fn elementwise(op: Logic, args: &Args) -> BuiltinResult {
    let (a, b) = operands(args)?;
    Ok(logical(op, &a, &b, Mode::Scalar)?.into())
}

/// `&&` and `||` with both sides already evaluated. The evaluator
/// short-circuits plain two-argument calls itself; only calls spliced from
/// `...` or with the wrong arity land here.
fn short(op: Logic, args: &Args) -> BuiltinResult {
    let [(_, a), (_, b)] = args.items() else {
        return Err(EvalError::new("operator needs two arguments"));
    };
    let x = condition_scalar(op, a, "x")?;
    let y = condition_scalar(op, b, "y")?;
    Ok(Value::boolean(match op {
        Logic::And => x && y,
        Logic::Or => x || y,
    }))
}

/// First element of one side of `&&` or `||`.
pub(crate) fn condition_scalar(op: Logic, value: &Value, side: &str) -> Result<bool, EvalError> {
    let symbol = match op {
        Logic::And => "&&",
        Logic::Or => "||",
    };
    let v = operand(value)?;
    if v.is_empty() {
        return Err(EvalError::new(format!("invalid '{side}' length in 'x {symbol} y'")));
    }
    Ok(v.as_bools()?[0])
}

/// All elements of all actuals as numbers. Text is rejected.
fn numbers(args: &Args) -> Result<Vec<f64>, EvalError> {
    let mut out = Vec::new();
    for (_, value) in args.items() {
        let v = operand(value)?;
        if matches!(v.kind(), VectorKind::Character | VectorKind::Factor) {
            return Err(EvalError::new(format!(
                "invalid 'type' ({}) of argument",
                v.kind().type_name()
            )));
        }
        out.extend(v.as_f64s()?);
    }
    Ok(out)
}

fn sum(_: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    Ok(Value::number(numbers(&args)?.into_iter().sum()))
}

fn extreme(args: &Args, empty: f64, pick: fn(f64, f64) -> f64) -> BuiltinResult {
    let values = numbers(args)?;
    if values.iter().any(|v| v.is_nan()) {
        return Ok(Value::number(f64::NAN));
    }
    Ok(Value::number(values.into_iter().fold(empty, pick)))
}

fn math(args: &Args, f: fn(f64) -> f64) -> BuiltinResult {
    let x = operand(nth(args, 0, "x")?)?;
    map1(&x, f)
        .map(Value::from)
        .map_err(|_| EvalError::new("non-numeric argument to mathematical function"))
}

fn log(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let x = operand(param(ctx, &args, "x")?)?;
    let out = match ctx.arg(&args, "base") {
        Some(base) => {
            let base = super::scalar(base, "base")?.ln();
            map1(&x, |v| v.ln() / base)
        }
        None => map1(&x, f64::ln),
    };
    Ok(out?.into())
}
