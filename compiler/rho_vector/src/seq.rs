//! Sequence generation.

use super::{Vector, VectorError, VectorResult, MAX_LENGTH};

/// Arguments to `seq`. Any two of `from`/`to`/`by` together with an
/// optional `length_out` determine the rest.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SeqSpec {
    pub from: Option<f64>,
    pub to: Option<f64>,
    pub by: Option<f64>,
    pub length_out: Option<f64>,
}

/// Tolerance for the last step, so `seq(0, 1, 0.1)` reaches 1.
const FUZZ: f64 = 1e-10;

impl SeqSpec {
    /// `from:to`.
    pub fn range(from: f64, to: f64) -> Self {
        SeqSpec {
            from: Some(from),
            to: Some(to),
            ..SeqSpec::default()
        }
    }

    pub fn generate(self) -> VectorResult<Vector> {
        let SeqSpec {
            mut from,
            mut to,
            by,
            length_out,
        } = self;

        // A lone argument is the upper bound: seq(5) is 1:5.
        if from.is_some() && to.is_none() && by.is_none() && length_out.is_none() {
            to = from;
            from = Some(1.0);
        }

        for (name, value) in [("from", from), ("to", to), ("by", by)] {
            if value.is_some_and(|v| !v.is_finite()) {
                return Err(VectorError::NotFinite(name));
            }
        }
        let length_out = length_out
            .map(|n| {
                if n.is_nan() || n < 0.0 {
                    Err(VectorError::InvalidLengthOut)
                } else if n.ceil() > MAX_LENGTH as f64 {
                    Err(VectorError::TooLong)
                } else {
                    Ok(n.ceil() as usize)
                }
            })
            .transpose()?;

        let values = match (from, to, by, length_out) {
            (Some(_), Some(_), Some(_), Some(_)) => return Err(VectorError::TooManySeqArguments),
            (from, to, by, None) => {
                let from = from.unwrap_or(1.0);
                let to = to.unwrap_or(1.0);
                stepped(from, to, by.unwrap_or(if from <= to { 1.0 } else { -1.0 }))?
            }
            (Some(from), Some(to), None, Some(n)) => match n {
                0 => Vec::new(),
                1 => vec![from],
                n => {
                    let by = (to - from) / (n - 1) as f64;
                    arithmetic(from, by, n)
                }
            },
            (from, None, by, Some(n)) => arithmetic(from.unwrap_or(1.0), by.unwrap_or(1.0), n),
            (None, Some(to), by, Some(n)) => {
                let by = by.unwrap_or(1.0);
                let from = to - by * n.saturating_sub(1) as f64;
                arithmetic(from, by, n)
            }
        };
        Ok(Vector::numeric(values))
    }
}

fn stepped(from: f64, to: f64, by: f64) -> VectorResult<Vec<f64>> {
    if from == to {
        return Ok(vec![from]);
    }
    if by == 0.0 {
        return Err(VectorError::InvalidBy);
    }
    let steps = (to - from) / by;
    if steps < 0.0 {
        return Err(VectorError::WrongSignInBy);
    }
    let n = (steps + FUZZ).floor() + 1.0;
    if n > MAX_LENGTH as f64 {
        return Err(VectorError::TooLong);
    }
    let n = n as usize;
    Ok(arithmetic(from, by, n))
}

fn arithmetic(from: f64, by: f64, n: usize) -> Vec<f64> {
    (0..n).map(|i| from + i as f64 * by).collect()
}
