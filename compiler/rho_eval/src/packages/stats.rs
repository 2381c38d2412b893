//! `library(stats)`: summary statistics and the normal distribution.

use std::f64::consts::{PI, SQRT_2};

use rho_vector::Vector;

use crate::builtins::{operand, param, scalar, BuiltinResult};
use crate::errors::{EvalError, EvalResult};
use crate::interpreter::CallContext;
use crate::registry::PackageScope;
use crate::resolver::{Args, ParamResolver, TypeTags};
use crate::Value;

/// Definitions written in the language itself.
const SOURCE: &str = r"
sd <- function(x) sqrt(var(x))
scale01 <- function(x) (x - min(x)) / (max(x) - min(x))
";

pub(super) fn init(scope: &mut PackageScope<'_>) -> EvalResult<()> {
    let sample = || {
        ParamResolver::builder()
            .required("x", TypeTags::NUMBER)
            .build()
    };
    scope.add_builtin("mean", mean, Some(sample()));
    scope.add_builtin("var", var, Some(sample()));
    scope.add_builtin(
        "dnorm",
        dnorm,
        Some(
            ParamResolver::builder()
                .required("x", TypeTags::NUMBER)
                .optional("mean", TypeTags::NUMBER)
                .with_default(|_| Some(Value::number(0.0)))
                .optional("sd", TypeTags::NUMBER)
                .with_default(|_| Some(Value::number(1.0)))
                .build(),
        ),
    );
    scope.add_builtin(
        "pnorm",
        pnorm,
        Some(
            ParamResolver::builder()
                .required("q", TypeTags::NUMBER)
                .optional("mean", TypeTags::NUMBER)
                .with_default(|_| Some(Value::number(0.0)))
                .optional("sd", TypeTags::NUMBER)
                .with_default(|_| Some(Value::number(1.0)))
                .optional("lower.tail", TypeTags::LOGICAL)
                .with_default(|_| Some(Value::boolean(true)))
                .build(),
        ),
    );
    scope.eval_source(SOURCE)?;
    Ok(())
}

fn values(ctx: &CallContext<'_>, args: &Args, name: &str) -> Result<Vec<f64>, EvalError> {
    Ok(operand(param(ctx, args, name)?)?.as_f64s()?)
}

fn mean(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let x = values(ctx, &args, "x")?;
    Ok(Value::number(average(&x)))
}

fn average(x: &[f64]) -> f64 {
    if x.is_empty() {
        return f64::NAN;
    }
    x.iter().sum::<f64>() / x.len() as f64
}

/// Sample variance, with an `n - 1` denominator.
fn var(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let x = values(ctx, &args, "x")?;
    if x.len() < 2 {
        return Ok(Value::number(f64::NAN));
    }
    let m = average(&x);
    let ss: f64 = x.iter().map(|v| (v - m).powi(2)).sum();
    Ok(Value::number(ss / (x.len() - 1) as f64))
}

/// Location and scale shared by `dnorm` and `pnorm`.
fn normal(ctx: &CallContext<'_>, args: &Args) -> Result<(f64, f64), EvalError> {
    let mean = scalar(param(ctx, args, "mean")?, "mean")?;
    let sd = scalar(param(ctx, args, "sd")?, "sd")?;
    Ok((mean, sd))
}

fn dnorm(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let x = values(ctx, &args, "x")?;
    let (mean, sd) = normal(ctx, &args)?;
    let density = |v: f64| {
        if sd < 0.0 {
            return f64::NAN;
        }
        let z = (v - mean) / sd;
        (-0.5 * z * z).exp() / (sd * (2.0 * PI).sqrt())
    };
    Ok(Vector::numeric(x.into_iter().map(density).collect()).into())
}

fn pnorm(ctx: &mut CallContext<'_>, args: Args) -> BuiltinResult {
    let q = values(ctx, &args, "q")?;
    let (mean, sd) = normal(ctx, &args)?;
    let lower = operand(param(ctx, &args, "lower.tail")?)?
        .as_bools()?
        .first()
        .copied()
        .unwrap_or(true);
    let probability = |v: f64| {
        if sd < 0.0 {
            return f64::NAN;
        }
        let p = 0.5 * erfc(-(v - mean) / (sd * SQRT_2));
        if lower {
            p
        } else {
            1.0 - p
        }
    };
    Ok(Vector::numeric(q.into_iter().map(probability).collect()).into())
}

/// Complementary error function, Chebyshev fit with fractional error
/// below 1.2e-7 everywhere.
fn erfc(x: f64) -> f64 {
    let z = x.abs();
    let t = 1.0 / (1.0 + 0.5 * z);
    let poly = -1.265_512_23
        + t * (1.000_023_68
            + t * (0.374_091_96
                + t * (0.096_784_18
                    + t * (-0.186_288_06
                        + t * (0.278_868_07
                            + t * (-1.135_203_98
                                + t * (1.488_515_87
                                    + t * (-0.822_152_23 + t * 0.170_872_77))))))));
    let r = t * (-z * z + poly).exp();
    if x >= 0.0 {
        r
    } else {
        2.0 - r
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
