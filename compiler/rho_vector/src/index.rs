//! Positional and named element access.
//!
//! Positions in the language are 1-based; everything below converts to
//! 0-based offsets as early as possible.

use super::{Vector, VectorData, VectorError, VectorKind, VectorResult, MAX_LENGTH};

/// A single-element index, as used by `[[`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Index {
    /// 1-based position.
    Position(usize),
    Name(String),
}

impl Index {
    /// Interpret a length-one vector as an index.
    pub fn from_vector(index: &Vector) -> VectorResult<Index> {
        match index.len() {
            0 => return Err(VectorError::SelectNone),
            1 => {}
            _ => return Err(VectorError::SelectMany),
        }
        match index.data() {
            VectorData::Character(names) => Ok(Index::Name(names[0].clone())),
            VectorData::Factor { .. } => Err(VectorError::InvalidSubscript("factor")),
            _ => {
                let position = index.first_f64().unwrap_or(f64::NAN);
                if position.is_nan() || position < 1.0 {
                    return Err(VectorError::SubscriptOutOfBounds);
                }
                Ok(Index::Position(position as usize))
            }
        }
    }

    fn to_vector(&self) -> Vector {
        match self {
            Index::Position(p) => Vector::scalar(*p as f64),
            Index::Name(name) => Vector::string(name.clone()),
        }
    }
}

impl Vector {
    fn position_of(&self, name: &str) -> Option<usize> {
        self.names()?.iter().position(|n| n == name)
    }

    /// 0-based offset that `x[[i]]` reads.
    pub fn element_offset(&self, index: &Index) -> VectorResult<usize> {
        match index {
            Index::Position(p) if (1..=self.len()).contains(p) => Ok(p - 1),
            Index::Position(_) => Err(VectorError::SubscriptOutOfBounds),
            Index::Name(name) => self
                .position_of(name)
                .ok_or(VectorError::SubscriptOutOfBounds),
        }
    }

    /// `x[[i]]`: one element, without its name.
    pub fn get(&self, index: &Index) -> VectorResult<Vector> {
        let position = self.element_offset(index)?;
        let mut element = self.select(&[position]);
        element.set_names_unchecked(None);
        Ok(element)
    }

    /// `x[[i]] <- value`.
    pub fn set(&self, index: &Index, value: &Vector) -> VectorResult<Vector> {
        if value.len() > 1 {
            return Err(VectorError::ReplacementTooLong);
        }
        self.assign(&index.to_vector(), value)
    }

    /// `x[i]` for an index vector: positions, negative exclusions, a logical
    /// mask, or names.
    pub fn subset(&self, index: &Vector) -> VectorResult<Vector> {
        let positions = self.subset_offsets(index)?;
        Ok(self.select(&positions))
    }

    /// 0-based offsets that `x[i]` reads, in selection order.
    pub fn subset_offsets(&self, index: &Vector) -> VectorResult<Vec<usize>> {
        let positions = match index.data() {
            VectorData::Character(names) => names
                .iter()
                .map(|n| self.position_of(n).ok_or(VectorError::SubscriptOutOfBounds))
                .collect::<VectorResult<Vec<usize>>>()?,
            _ => self.offsets(index)?,
        };
        if positions.iter().any(|&p| p >= self.len()) {
            return Err(VectorError::SubscriptOutOfBounds);
        }
        Ok(positions)
    }

    /// `x[i] <- value`, recycling `value` over the selected positions.
    /// Positions past the end extend the vector.
    pub fn assign(&self, index: &Vector, value: &Vector) -> VectorResult<Vector> {
        if value.is_empty() {
            return Err(VectorError::ReplacementLengthZero);
        }
        let (positions, new_names) = self.assign_offsets(index)?;

        let mut out = match (self.kind(), value.kind()) {
            (VectorKind::Factor, _) => self.clone(),
            (own, VectorKind::Factor) => self.coerce(own.max(VectorKind::Character))?,
            (own, other) => self.coerce(own.max(other))?,
        };
        let old_len = out.len();
        let new_len = positions
            .iter()
            .map(|&p| p + 1)
            .max()
            .map_or(old_len, |end| end.max(old_len));
        if new_len > MAX_LENGTH {
            return Err(VectorError::TooLong);
        }

        match &mut out.data {
            VectorData::Numeric(d) | VectorData::DateTime(d) => {
                write(d, &value.as_f64s()?, &positions, new_len, f64::NAN);
            }
            VectorData::Logical(d) => write(d, &value.as_bools()?, &positions, new_len, false),
            VectorData::Character(d) => {
                write(d, &value.as_strings(), &positions, new_len, String::new());
            }
            VectorData::Factor { codes, levels } => {
                if new_len > codes.len() {
                    return Err(VectorError::SubscriptOutOfBounds);
                }
                let replacement = value
                    .as_strings()
                    .iter()
                    .map(|s| {
                        levels
                            .iter()
                            .position(|l| l == s)
                            .map(|i| i as u32 + 1)
                            .ok_or(VectorError::InvalidFactorLevel)
                    })
                    .collect::<VectorResult<Vec<u32>>>()?;
                write(codes, &replacement, &positions, new_len, 0);
            }
        }

        if out.names.is_some() || !new_names.is_empty() {
            let mut names = out.names.take().unwrap_or_default();
            names.resize(new_len, String::new());
            for (position, name) in new_names {
                names[position] = name;
            }
            out.names = Some(names);
        }
        Ok(out)
    }

    /// 0-based offsets for a numeric or logical index.
    fn offsets(&self, index: &Vector) -> VectorResult<Vec<usize>> {
        match index.data() {
            VectorData::Logical(mask) => {
                if mask.is_empty() {
                    return Ok(Vec::new());
                }
                let n = self.len().max(mask.len());
                Ok((0..n).filter(|&i| mask[i % mask.len()]).collect())
            }
            VectorData::Character(_) => Err(VectorError::InvalidSubscript("character")),
            _ => {
                let values: Vec<f64> = index.as_f64s()?.into_iter().map(f64::trunc).collect();
                if values.iter().any(|v| v.is_nan()) {
                    return Err(VectorError::InvalidSubscript("double"));
                }
                let negative = values.iter().any(|&v| v < 0.0);
                let positive = values.iter().any(|&v| v > 0.0);
                if negative && positive {
                    return Err(VectorError::MixedSubscripts);
                }
                if negative {
                    let excluded: Vec<usize> = values
                        .iter()
                        .filter(|&&v| v < 0.0)
                        .map(|&v| (-v) as usize - 1)
                        .collect();
                    return Ok((0..self.len()).filter(|i| !excluded.contains(i)).collect());
                }
                Ok(values
                    .into_iter()
                    .filter(|&v| v >= 1.0)
                    .map(|v| v as usize - 1)
                    .collect())
            }
        }
    }

    /// Offsets that `x[i] <- value` writes. Unknown names get fresh slots
    /// after the end and are returned alongside.
    pub fn assign_offsets(&self, index: &Vector) -> VectorResult<(Vec<usize>, Vec<(usize, String)>)> {
        let VectorData::Character(names) = index.data() else {
            return Ok((self.offsets(index)?, Vec::new()));
        };
        let mut positions = Vec::with_capacity(names.len());
        let mut new_names: Vec<(usize, String)> = Vec::new();
        for name in names {
            let position = match self.position_of(name) {
                Some(p) => p,
                None => match new_names.iter().find(|(_, n)| n == name) {
                    Some(&(p, _)) => p,
                    None => {
                        let p = self.len() + new_names.len();
                        new_names.push((p, name.clone()));
                        p
                    }
                },
            };
            positions.push(position);
        }
        Ok((positions, new_names))
    }
}

/// Write `src` (recycled) into `dst` at `positions`, growing `dst` to
/// `len` with `fill` first.
fn write<T: Clone>(dst: &mut Vec<T>, src: &[T], positions: &[usize], len: usize, fill: T) {
    if dst.len() < len {
        dst.resize(len, fill);
    }
    for (i, &p) in positions.iter().enumerate() {
        dst[p] = src[i % src.len()].clone();
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
