//! Element access and replacement: `[`, `[[`, `$` and their setters.
//!
//! Lists reuse the vector subscript rules through a placeholder vector
//! carrying the list's length and names.

use rho_vector::{Index, Vector, VectorError, MAX_LENGTH};

use super::{nth, operand, text, BuiltinResult};
use crate::errors::{missing_argument, EvalError};
use crate::interpreter::CallContext;
use crate::registry::PackageScope;
use crate::resolver::Args;
use crate::value::ListItem;
use crate::Value;

pub(super) fn register(scope: &mut PackageScope<'_>) {
    scope.add_builtin("[", subset, None);
    scope.add_builtin("[[", element, None);
    scope.add_builtin("$", dollar, None);
    scope.add_builtin("[<-", assign_subset, None);
    scope.add_builtin("[[<-", assign_element, None);
    scope.add_builtin("$<-", assign_dollar, None);
}

/// Placeholder with the length and names of `items`.
fn shape(ctx: &CallContext<'_>, items: &[ListItem]) -> Result<Vector, VectorError> {
    let names = items.iter().any(|(n, _)| n.is_some()).then(|| {
        items
            .iter()
            .map(|(n, _)| n.map_or_else(String::new, |n| ctx.interner().lookup(n).to_owned()))
            .collect()
    });
    Vector::logical(vec![false; items.len()]).with_names(names)
}

fn not_subsettable(value: &Value) -> EvalError {
    EvalError::new(format!(
        "object of type '{}' is not subsettable",
        value.type_name()
    ))
}

/// The replacement value of a setter call.
fn replacement<'a>(ctx: &CallContext<'_>, args: &'a Args, position: usize) -> Result<&'a Value, EvalError> {
    ctx.arg(args, "value")
        .or_else(|| args.get(position))
        .ok_or_else(|| missing_argument("value"))
}

fn subset(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let x = nth(&args, 0, "x")?;
    let index = match args.get(1) {
        None | Some(Value::Missing) => return Ok(x.clone()),
        Some(index) => operand(index)?,
    };
    match x {
        Value::Vector(v) => Ok(v.subset(&index)?.into()),
        Value::List(items) => {
            let offsets = shape(ctx, items)?.subset_offsets(&index)?;
            Ok(Value::List(offsets.into_iter().map(|o| items[o].clone()).collect()))
        }
        Value::Null => Ok(Value::Null),
        other => Err(not_subsettable(other)),
    }
}

fn element(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let x = nth(&args, 0, "x")?;
    let index = operand(nth(&args, 1, "i")?)?;
    match x {
        Value::Vector(v) => Ok(v.get(&Index::from_vector(&index)?)?.into()),
        Value::List(items) => {
            let offset = shape(ctx, items)?.element_offset(&Index::from_vector(&index)?)?;
            Ok(items[offset].1.clone())
        }
        Value::Env(env) => {
            let name = text(&Value::Vector(index), "i")?;
            match env.lookup_local(ctx.sym(&name)) {
                Some(value) => ctx.force(value),
                None => Ok(Value::Null),
            }
        }
        other => Err(not_subsettable(other)),
    }
}

fn dollar(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let x = nth(&args, 0, "x")?;
    let name = text(nth(&args, 1, "name")?, "name")?;
    match x {
        Value::List(items) => Ok(items
            .iter()
            .find(|(n, _)| n.is_some_and(|n| ctx.interner().lookup(n) == name))
            .map_or(Value::Null, |(_, v)| v.clone())),
        Value::Env(env) => match env.lookup_local(ctx.sym(&name)) {
            Some(value) => ctx.force(value),
            None => Ok(Value::Null),
        },
        Value::Null => Ok(Value::Null),
        Value::Vector(_) => Err(EvalError::new("$ operator is invalid for atomic vectors")),
        other => Err(not_subsettable(other)),
    }
}

/// Write `value` into `items` at the offsets `index` selects. `NULL`
/// removes the selected elements. With `single`, `value` is stored whole
/// instead of being spread over the offsets.
fn list_assign(
    ctx: &CallContext<'_>,
    items: &[ListItem],
    index: &Vector,
    value: &Value,
    single: bool,
) -> BuiltinResult {
    let (offsets, new_names) = shape(ctx, items)?.assign_offsets(index)?;
    let mut out = items.to_vec();

    if matches!(value, Value::Null) {
        let mut doomed: Vec<usize> = offsets.into_iter().filter(|&o| o < out.len()).collect();
        doomed.sort_unstable();
        doomed.dedup();
        for offset in doomed.into_iter().rev() {
            out.remove(offset);
        }
        return Ok(Value::List(out));
    }

    let values: Vec<Value> = match value {
        Value::List(vals) if !single => vals.iter().map(|(_, v)| v.clone()).collect(),
        Value::Vector(v) if !single && v.len() > 1 => (1..=v.len())
            .map(|p| v.get(&Index::Position(p)).map(Value::from))
            .collect::<Result<_, _>>()?,
        value => vec![value.clone()],
    };
    if values.is_empty() {
        return Err(VectorError::ReplacementLengthZero.into());
    }

    let end = offsets.iter().map(|o| o + 1).max().unwrap_or(0);
    if end > MAX_LENGTH {
        return Err(VectorError::TooLong.into());
    }
    if end > out.len() {
        out.resize(end, (None, Value::Null));
    }
    for (i, &offset) in offsets.iter().enumerate() {
        out[offset].1 = values[i % values.len()].clone();
    }
    for (offset, name) in new_names {
        out[offset].0 = Some(ctx.sym(&name));
    }
    Ok(Value::List(out))
}

fn assign_subset(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let x = nth(&args, 0, "x")?;
    let value = replacement(ctx, &args, 2)?;
    let whole = |len: usize| Vector::numeric((1..=len).map(|p| p as f64).collect());
    let index = match args.get(1) {
        None | Some(Value::Missing) => None,
        Some(index) => Some(operand(index)?),
    };
    match (x, value) {
        (Value::List(items), value) => {
            let index = index.unwrap_or_else(|| whole(items.len()));
            list_assign(ctx, items, &index, value, false)
        }
        (Value::Vector(_) | Value::Null, Value::Vector(replacement)) => {
            let target = operand(x)?;
            let index = index.unwrap_or_else(|| whole(target.len()));
            Ok(target.assign(&index, replacement)?.into())
        }
        (Value::Null, value) => {
            let index = index.unwrap_or_else(|| whole(0));
            list_assign(ctx, &[], &index, value, false)
        }
        _ => Err(EvalError::new("incompatible types in subassignment")),
    }
}

fn assign_element(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let x = nth(&args, 0, "x")?;
    let index = operand(nth(&args, 1, "i")?)?;
    let value = replacement(ctx, &args, 2)?;
    match (x, value) {
        (Value::Vector(v), Value::Vector(replacement)) => {
            Ok(v.set(&Index::from_vector(&index)?, replacement)?.into())
        }
        (Value::List(items), value) => {
            Index::from_vector(&index)?;
            list_assign(ctx, items, &index, value, true)
        }
        (Value::Null, value) => {
            Index::from_vector(&index)?;
            list_assign(ctx, &[], &index, value, true)
        }
        (Value::Env(env), value) => {
            let name = text(&Value::Vector(index), "i")?;
            env.store(ctx.sym(&name), value.clone());
            Ok(x.clone())
        }
        _ => Err(EvalError::new("more elements supplied than there are to replace")),
    }
}

fn assign_dollar(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let x = nth(&args, 0, "x")?;
    let name = text(nth(&args, 1, "name")?, "name")?;
    let value = replacement(ctx, &args, 2)?;
    match x {
        Value::List(items) => list_assign(ctx, items, &Vector::string(name), value, true),
        Value::Null => list_assign(ctx, &[], &Vector::string(name), value, true),
        Value::Env(env) => {
            env.store(ctx.sym(&name), value.clone());
            Ok(x.clone())
        }
        Value::Vector(_) => Err(EvalError::new("$ operator is invalid for atomic vectors")),
        other => Err(not_subsettable(other)),
    }
}
