//! Vector construction and attributes.

use rho_vector::{parse_datetime, SeqSpec, Vector, VectorData, VectorKind};

use super::{nth, operand, param, scalar, text, BuiltinResult};
use crate::errors::{invalid_argument_type, missing_argument, EvalError};
use crate::interpreter::CallContext;
use crate::registry::PackageScope;
use crate::resolver::{Args, ParamResolver, ResolvedArgs, TypeTags};
use crate::Value;

pub(super) fn register(scope: &mut PackageScope<'_>) {
    scope.add_builtin(
        "seq",
        seq,
        Some(
            ParamResolver::builder()
                .optional("from", TypeTags::NUMBER)
                .optional("to", TypeTags::NUMBER)
                .optional("by", TypeTags::NUMBER)
                .optional("length.out", TypeTags::NUMBER)
                .build(),
        ),
    );
    scope.add_builtin("c", combine, None);
    scope.add_builtin("list", |_, args| Ok(Value::List(args.into_items())), None);
    scope.add_builtin(
        "length",
        |_, args| Ok(Value::number(nth(&args, 0, "x")?.len() as f64)),
        None,
    );
    scope.add_builtin("names", names, None);
    scope.add_builtin("names<-", set_names, None);
    scope.add_builtin(
        "factor",
        factor,
        Some(
            ParamResolver::builder()
                .required("x", TypeTags::VECTOR | TypeTags::NULL)
                .optional("levels", TypeTags::VECTOR)
                .with_default(sorted_levels)
                .optional("labels", TypeTags::VECTOR)
                .build(),
        ),
    );
    scope.add_builtin("levels", levels, None);
    scope.add_builtin(
        "as.POSIXct",
        as_posixct,
        Some(
            ParamResolver::builder()
                .required("x", TypeTags::CHARACTER | TypeTags::NUMBER | TypeTags::DATETIME)
                .optional("tz", TypeTags::CHARACTER)
                .build(),
        ),
    );
    scope.add_builtin("paste", paste, None);
}

fn seq(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let number = |name: &str| ctx.arg(&args, name).map(|v| scalar(v, name)).transpose();
    let spec = SeqSpec {
        from: number("from")?,
        to: number("to")?,
        by: number("by")?,
        length_out: number("length.out")?,
    };
    Ok(spec.generate()?.into())
}

/// `c(...)`. Any list or non-vector actual makes the result a list.
fn combine(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let items = args.into_items();
    if items
        .iter()
        .any(|(_, v)| !matches!(v, Value::Vector(_) | Value::Null))
    {
        let mut out = Vec::with_capacity(items.len());
        for (name, value) in items {
            match value {
                Value::List(inner) => out.extend(inner),
                Value::Null => {}
                value => out.push((name, value)),
            }
        }
        return Ok(Value::List(out));
    }

    let parts: Vec<(Option<String>, Vector)> = items
        .into_iter()
        .filter_map(|(name, value)| match value {
            Value::Vector(v) => Some((name.map(|n| ctx.interner().lookup(n).to_owned()), v)),
            _ => None,
        })
        .collect();
    if parts.is_empty() {
        return Ok(Value::Null);
    }
    Ok(Vector::concat(&parts)?.into())
}

fn names(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let labels: Option<Vec<String>> = match nth(&args, 0, "x")? {
        Value::Vector(v) => v.names().map(<[String]>::to_vec),
        Value::List(items) if items.iter().any(|(n, _)| n.is_some()) => Some(
            items
                .iter()
                .map(|(n, _)| n.map_or_else(String::new, |n| ctx.interner().lookup(n).to_owned()))
                .collect(),
        ),
        Value::Env(env) => {
            let mut names: Vec<String> = env
                .symbols()
                .into_iter()
                .map(|n| ctx.interner().lookup(n).to_owned())
                .collect();
            names.sort();
            Some(names)
        }
        _ => None,
    };
    Ok(labels.map_or(Value::Null, |l| Vector::character(l).into()))
}

/// `` `names<-`(x, value) ``. Short names are padded with "".
fn set_names(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let x = nth(&args, 0, "x")?;
    let value = ctx
        .arg(&args, "value")
        .or_else(|| args.get(1))
        .ok_or_else(|| missing_argument("value"))?;
    let labels = match value {
        Value::Null => None,
        Value::Vector(v) => Some(v.as_strings()),
        _ => return Err(invalid_argument_type("value")),
    };
    match x {
        Value::Vector(v) => {
            let labels = labels.map(|mut l| {
                if l.len() < v.len() {
                    l.resize(v.len(), String::new());
                }
                l
            });
            Ok(v.clone().with_names(labels)?.into())
        }
        Value::List(items) => {
            let mut items = items.clone();
            for (i, (name, _)) in items.iter_mut().enumerate() {
                *name = labels
                    .as_ref()
                    .and_then(|l| l.get(i))
                    .filter(|s| !s.is_empty())
                    .map(|s| ctx.sym(s));
            }
            Ok(Value::List(items))
        }
        Value::Null => Ok(Value::Null),
        _ => Err(EvalError::new("names() applied to a non-vector")),
    }
}

/// Distinct values of `x` in sorted order: numerically for numbers,
/// lexically for text.
fn sorted_levels(args: &ResolvedArgs<'_>) -> Option<Value> {
    let x = args.get("x")?.as_vector()?;
    let labels = x.as_strings();
    let mut pairs: Vec<(f64, String)> = match x.kind() {
        VectorKind::Character => labels.into_iter().map(|s| (0.0, s)).collect(),
        _ => x.as_f64s().ok()?.into_iter().zip(labels).collect(),
    };
    pairs.sort_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(&b.1)));
    pairs.dedup_by(|a, b| a.1 == b.1);
    Some(Vector::character(pairs.into_iter().map(|(_, s)| s).collect()).into())
}

fn factor(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let values = operand(param(ctx, &args, "x")?)?.as_strings();
    let levels = ctx
        .arg(&args, "levels")
        .map(|l| operand(l).map(|v| v.as_strings()))
        .transpose()?;
    let f = Vector::factor(&values, levels)?;

    let Some(labels) = ctx.arg(&args, "labels") else {
        return Ok(f.into());
    };
    let labels = operand(labels)?.as_strings();
    match f.data() {
        VectorData::Factor { codes, levels } if labels.len() == levels.len() => {
            Ok(Vector::new(VectorData::Factor {
                codes: codes.clone(),
                levels: labels,
            })
            .into())
        }
        _ => Err(EvalError::new(format!(
            "invalid 'labels'; length {} should be {}",
            labels.len(),
            f.levels().map_or(0, <[String]>::len)
        ))),
    }
}

fn levels(_: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let levels = nth(&args, 0, "x")?
        .as_vector()
        .and_then(Vector::levels)
        .map(<[String]>::to_vec);
    Ok(levels.map_or(Value::Null, |l| Vector::character(l).into()))
}

/// Only UTC is supported.
fn as_posixct(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    if let Some(tz) = ctx.arg(&args, "tz") {
        let tz = text(tz, "tz")?;
        if !matches!(tz.as_str(), "" | "UTC" | "GMT") {
            return Err(EvalError::new(format!("unsupported time zone '{tz}'")));
        }
    }
    let x = operand(param(ctx, &args, "x")?)?;
    let seconds = match x.kind() {
        VectorKind::Character => x
            .as_strings()
            .iter()
            .map(|s| parse_datetime(s))
            .collect::<Result<Vec<f64>, _>>()?,
        _ => x.as_f64s()?,
    };
    Ok(Vector::datetime(seconds).into())
}

/// `paste(..., sep = " ", collapse = NULL)`. Zero-length actuals drop out;
/// the rest recycle to the longest.
fn paste(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let sep_name = ctx.sym("sep");
    let collapse_name = ctx.sym("collapse");
    let mut sep = " ".to_owned();
    let mut collapse = None;
    let mut columns: Vec<Vec<String>> = Vec::new();

    for (name, value) in args.items() {
        match *name {
            Some(n) if n == sep_name => sep = text(value, "sep")?,
            Some(n) if n == collapse_name => {
                if !matches!(value, Value::Null) {
                    collapse = Some(text(value, "collapse")?);
                }
            }
            _ => {
                let column = strings_of(ctx, value);
                if !column.is_empty() {
                    columns.push(column);
                }
            }
        }
    }

    let len = columns.iter().map(Vec::len).max().unwrap_or(0);
    let joined: Vec<String> = (0..len)
        .map(|i| {
            columns
                .iter()
                .map(|c| c[i % c.len()].as_str())
                .collect::<Vec<_>>()
                .join(&sep)
        })
        .collect();
    Ok(match collapse {
        Some(c) => Value::string(joined.join(&c)),
        None => Vector::character(joined).into(),
    })
}

pub(super) fn strings_of(ctx: &CallContext<'_>, value: &Value) -> Vec<String> {
    match value {
        Value::Vector(v) => v.as_strings(),
        Value::Null => Vec::new(),
        Value::List(items) => items
            .iter()
            .map(|(_, item)| match item {
                Value::Vector(v) if v.len() == 1 => v.as_strings().swap_remove(0),
                other => ctx.display(other),
            })
            .collect(),
        other => vec![ctx.display(other)],
    }
}
