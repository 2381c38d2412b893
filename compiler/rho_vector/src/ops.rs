//! Elementwise maps with recycling.

use super::{Vector, VectorError, VectorKind, VectorResult};

/// How operand lengths are reconciled.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum Mode {
    /// Recycle the shorter operand; a zero-length operand gives a zero-length
    /// result. This is what the arithmetic operators use.
    #[default]
    Scalar,
    /// Lengths must match exactly.
    Exact,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Arith {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Mod,
    IntDiv,
}

impl Arith {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "+" => Arith::Add,
            "-" => Arith::Sub,
            "*" => Arith::Mul,
            "/" => Arith::Div,
            "^" => Arith::Pow,
            "%%" => Arith::Mod,
            "%/%" => Arith::IntDiv,
            _ => return None,
        })
    }

    fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Arith::Add => a + b,
            Arith::Sub => a - b,
            Arith::Mul => a * b,
            Arith::Div => a / b,
            Arith::Pow => a.powf(b),
            // Result takes the sign of the divisor.
            Arith::Mod => a - (a / b).floor() * b,
            Arith::IntDiv => (a / b).floor(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Comparison {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
}

impl Comparison {
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Some(match symbol {
            "==" => Comparison::Eq,
            "!=" => Comparison::Ne,
            "<" => Comparison::Lt,
            ">" => Comparison::Gt,
            "<=" => Comparison::Le,
            ">=" => Comparison::Ge,
            _ => return None,
        })
    }

    fn apply<T: PartialOrd + ?Sized>(self, a: &T, b: &T) -> bool {
        match self {
            Comparison::Eq => a == b,
            Comparison::Ne => a != b,
            Comparison::Lt => a < b,
            Comparison::Gt => a > b,
            Comparison::Le => a <= b,
            Comparison::Ge => a >= b,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Logic {
    And,
    Or,
}

fn result_len(left: usize, right: usize, mode: Mode) -> VectorResult<usize> {
    match mode {
        Mode::Exact if left != right => Err(VectorError::LengthMismatch { left, right }),
        Mode::Exact => Ok(left),
        Mode::Scalar if left == 0 || right == 0 => Ok(0),
        Mode::Scalar => Ok(left.max(right)),
    }
}

/// Names of whichever operand already has the result's length, left first.
fn result_names(a: &Vector, b: &Vector, len: usize) -> Option<Vec<String>> {
    if a.len() == len {
        if let Some(names) = a.names() {
            return Some(names.to_vec());
        }
    }
    if b.len() == len {
        return b.names().map(<[String]>::to_vec);
    }
    None
}

fn recycle<T: Copy, R>(
    xs: &[T],
    ys: &[T],
    len: usize,
    f: impl Fn(T, T) -> R,
) -> Vec<R> {
    (0..len)
        .map(|i| f(xs[i % xs.len()], ys[i % ys.len()]))
        .collect()
}

fn is_textual(v: &Vector) -> bool {
    matches!(v.kind(), VectorKind::Character | VectorKind::Factor)
}

/// Elementwise arithmetic.
///
/// Adding to or subtracting from a date-time keeps the date-time class;
/// the difference of two date-times is a plain number of seconds.
pub fn arith(op: Arith, a: &Vector, b: &Vector, mode: Mode) -> VectorResult<Vector> {
    if is_textual(a) || is_textual(b) {
        return Err(VectorError::NonNumeric);
    }
    let len = result_len(a.len(), b.len(), mode)?;
    let values = recycle(&a.as_f64s()?, &b.as_f64s()?, len, |x, y| op.apply(x, y));

    let a_time = a.kind() == VectorKind::DateTime;
    let b_time = b.kind() == VectorKind::DateTime;
    let keeps_time = matches!(op, Arith::Add | Arith::Sub) && (a_time != b_time);
    let mut out = if keeps_time {
        Vector::datetime(values)
    } else {
        Vector::numeric(values)
    };
    out.set_names_unchecked(result_names(a, b, len));
    Ok(out)
}

/// Elementwise comparison. Text operands compare as strings.
pub fn compare(op: Comparison, a: &Vector, b: &Vector, mode: Mode) -> VectorResult<Vector> {
    let len = result_len(a.len(), b.len(), mode)?;
    let values = if is_textual(a) || is_textual(b) {
        let xs = a.as_strings();
        let ys = b.as_strings();
        (0..len)
            .map(|i| op.apply(xs[i % xs.len()].as_str(), ys[i % ys.len()].as_str()))
            .collect()
    } else {
        recycle(&a.as_f64s()?, &b.as_f64s()?, len, |x, y| op.apply(&x, &y))
    };
    let mut out = Vector::logical(values);
    out.set_names_unchecked(result_names(a, b, len));
    Ok(out)
}

/// Elementwise `&` / `|`.
pub fn logical(op: Logic, a: &Vector, b: &Vector, mode: Mode) -> VectorResult<Vector> {
    if is_textual(a) || is_textual(b) {
        return Err(VectorError::NonLogical);
    }
    let len = result_len(a.len(), b.len(), mode)?;
    let values = recycle(&a.as_bools()?, &b.as_bools()?, len, |x, y| match op {
        Logic::And => x && y,
        Logic::Or => x || y,
    });
    let mut out = Vector::logical(values);
    out.set_names_unchecked(result_names(a, b, len));
    Ok(out)
}

/// Elementwise unary map over numbers, keeping names.
pub fn map1(v: &Vector, f: impl Fn(f64) -> f64) -> VectorResult<Vector> {
    if is_textual(v) {
        return Err(VectorError::NonNumericMath);
    }
    let mut out = Vector::numeric(v.as_f64s()?.into_iter().map(f).collect());
    out.set_names_unchecked(v.names().map(<[String]>::to_vec));
    Ok(out)
}

/// Elementwise `!`.
pub fn not(v: &Vector) -> VectorResult<Vector> {
    if is_textual(v) {
        return Err(VectorError::InvalidUnary);
    }
    let mut out = Vector::logical(v.as_bools()?.into_iter().map(|b| !b).collect());
    out.set_names_unchecked(v.names().map(<[String]>::to_vec));
    Ok(out)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
