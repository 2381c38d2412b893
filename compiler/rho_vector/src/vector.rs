//! Vector storage, construction and coercion.

use super::datetime::format_datetime;
use super::format::format_number_alone;
use super::{VectorError, VectorResult};

/// Longest vector any operation will build.
pub const MAX_LENGTH: usize = i32::MAX as usize;

/// Element storage. Every variant is a plain column of values.
#[derive(Clone, Debug, PartialEq)]
pub enum VectorData {
    Numeric(Vec<f64>),
    Logical(Vec<bool>),
    Character(Vec<String>),
    /// `codes` are 1-based indices into `levels`.
    Factor { codes: Vec<u32>, levels: Vec<String> },
    /// Seconds since the Unix epoch, UTC.
    DateTime(Vec<f64>),
}

/// Kind tag, ordered by how `c()` promotes mixed inputs.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum VectorKind {
    Logical,
    Numeric,
    DateTime,
    Factor,
    Character,
}

impl VectorKind {
    /// Storage type name as `typeof()` would report it.
    pub fn type_name(self) -> &'static str {
        match self {
            VectorKind::Logical => "logical",
            VectorKind::Numeric | VectorKind::DateTime => "double",
            VectorKind::Factor => "integer",
            VectorKind::Character => "character",
        }
    }

    /// Class name as `class()` would report it.
    pub fn class_name(self) -> &'static str {
        match self {
            VectorKind::Logical => "logical",
            VectorKind::Numeric => "numeric",
            VectorKind::DateTime => "POSIXct",
            VectorKind::Factor => "factor",
            VectorKind::Character => "character",
        }
    }
}

/// A typed vector with optional element names.
#[derive(Clone, Debug, PartialEq)]
pub struct Vector {
    pub(crate) data: VectorData,
    pub(crate) names: Option<Vec<String>>,
}

impl Vector {
    pub fn new(data: VectorData) -> Self {
        Vector { data, names: None }
    }

    pub fn numeric(values: Vec<f64>) -> Self {
        Self::new(VectorData::Numeric(values))
    }

    pub fn scalar(value: f64) -> Self {
        Self::numeric(vec![value])
    }

    pub fn logical(values: Vec<bool>) -> Self {
        Self::new(VectorData::Logical(values))
    }

    pub fn boolean(value: bool) -> Self {
        Self::logical(vec![value])
    }

    pub fn character(values: Vec<String>) -> Self {
        Self::new(VectorData::Character(values))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::character(vec![value.into()])
    }

    pub fn datetime(seconds: Vec<f64>) -> Self {
        Self::new(VectorData::DateTime(seconds))
    }

    /// Factor over `values`. Without explicit `levels` the sorted unique
    /// values are used.
    pub fn factor(values: &[String], levels: Option<Vec<String>>) -> VectorResult<Self> {
        let levels = levels.unwrap_or_else(|| {
            let mut levels = values.to_vec();
            levels.sort();
            levels.dedup();
            levels
        });
        let codes = values
            .iter()
            .map(|v| {
                levels
                    .iter()
                    .position(|l| l == v)
                    .map(|i| i as u32 + 1)
                    .ok_or(VectorError::InvalidFactorLevel)
            })
            .collect::<VectorResult<Vec<u32>>>()?;
        Ok(Self::new(VectorData::Factor { codes, levels }))
    }

    pub fn empty(kind: VectorKind) -> Self {
        Self::new(match kind {
            VectorKind::Logical => VectorData::Logical(Vec::new()),
            VectorKind::Numeric => VectorData::Numeric(Vec::new()),
            VectorKind::DateTime => VectorData::DateTime(Vec::new()),
            VectorKind::Factor => VectorData::Factor {
                codes: Vec::new(),
                levels: Vec::new(),
            },
            VectorKind::Character => VectorData::Character(Vec::new()),
        })
    }

    // ===== Accessors =====

    pub fn data(&self) -> &VectorData {
        &self.data
    }

    pub fn kind(&self) -> VectorKind {
        match self.data {
            VectorData::Numeric(_) => VectorKind::Numeric,
            VectorData::Logical(_) => VectorKind::Logical,
            VectorData::Character(_) => VectorKind::Character,
            VectorData::Factor { .. } => VectorKind::Factor,
            VectorData::DateTime(_) => VectorKind::DateTime,
        }
    }

    pub fn len(&self) -> usize {
        match &self.data {
            VectorData::Numeric(v) | VectorData::DateTime(v) => v.len(),
            VectorData::Logical(v) => v.len(),
            VectorData::Character(v) => v.len(),
            VectorData::Factor { codes, .. } => codes.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn names(&self) -> Option<&[String]> {
        self.names.as_deref()
    }

    /// Replace the names. `None` removes them.
    pub fn with_names(mut self, names: Option<Vec<String>>) -> VectorResult<Self> {
        if let Some(names) = &names {
            if names.len() != self.len() {
                return Err(VectorError::NamesLength {
                    names: names.len(),
                    len: self.len(),
                });
            }
        }
        self.names = names;
        Ok(self)
    }

    /// Names taken verbatim; used internally where lengths are known to match.
    pub(crate) fn set_names_unchecked(&mut self, names: Option<Vec<String>>) {
        self.names = names;
    }

    pub fn levels(&self) -> Option<&[String]> {
        match &self.data {
            VectorData::Factor { levels, .. } => Some(levels),
            _ => None,
        }
    }

    // ===== Coercion =====

    /// Elements as doubles. Factors yield their codes.
    pub fn as_f64s(&self) -> VectorResult<Vec<f64>> {
        match &self.data {
            VectorData::Numeric(v) | VectorData::DateTime(v) => Ok(v.clone()),
            VectorData::Logical(v) => Ok(v.iter().map(|&b| f64::from(u8::from(b))).collect()),
            VectorData::Factor { codes, .. } => Ok(codes.iter().map(|&c| f64::from(c)).collect()),
            VectorData::Character(v) => v
                .iter()
                .map(|s| parse_number(s))
                .collect::<Option<Vec<f64>>>()
                .ok_or(VectorError::Coercion {
                    from: "character",
                    to: "double",
                }),
        }
    }

    pub fn as_bools(&self) -> VectorResult<Vec<bool>> {
        match &self.data {
            VectorData::Logical(v) => Ok(v.clone()),
            VectorData::Numeric(v) => Ok(v.iter().map(|&x| x != 0.0).collect()),
            VectorData::Character(v) => v
                .iter()
                .map(|s| match s.as_str() {
                    "TRUE" | "true" | "T" | "True" => Some(true),
                    "FALSE" | "false" | "F" | "False" => Some(false),
                    _ => None,
                })
                .collect::<Option<Vec<bool>>>()
                .ok_or(VectorError::Coercion {
                    from: "character",
                    to: "logical",
                }),
            VectorData::Factor { .. } | VectorData::DateTime(_) => Err(VectorError::Coercion {
                from: self.kind().type_name(),
                to: "logical",
            }),
        }
    }

    /// Elements as strings, each formatted on its own.
    pub fn as_strings(&self) -> Vec<String> {
        match &self.data {
            VectorData::Numeric(v) => v.iter().map(|&x| format_number_alone(x)).collect(),
            VectorData::Logical(v) => v
                .iter()
                .map(|&b| if b { "TRUE" } else { "FALSE" }.to_owned())
                .collect(),
            VectorData::Character(v) => v.clone(),
            VectorData::Factor { codes, levels } => codes
                .iter()
                .map(|&c| level_label(levels, c))
                .collect(),
            VectorData::DateTime(v) => v.iter().map(|&s| format_datetime(s)).collect(),
        }
    }

    /// First element as a double, if there is one and it converts.
    pub fn first_f64(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        match &self.data {
            VectorData::Numeric(v) | VectorData::DateTime(v) => v.first().copied(),
            VectorData::Logical(v) => v.first().map(|&b| f64::from(u8::from(b))),
            VectorData::Factor { codes, .. } => codes.first().map(|&c| f64::from(c)),
            VectorData::Character(v) => v.first().and_then(|s| parse_number(s)),
        }
    }

    /// First element as a string.
    pub fn first_string(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        match &self.data {
            VectorData::Character(v) => v.first().cloned(),
            _ => self.select(&[0]).as_strings().pop(),
        }
    }

    /// Convert to `kind`, keeping names.
    pub fn coerce(&self, kind: VectorKind) -> VectorResult<Vector> {
        if kind == self.kind() {
            return Ok(self.clone());
        }
        let data = match kind {
            VectorKind::Logical => VectorData::Logical(self.as_bools()?),
            VectorKind::Numeric => VectorData::Numeric(self.as_f64s()?),
            VectorKind::DateTime => VectorData::DateTime(self.as_f64s()?),
            VectorKind::Character => VectorData::Character(self.as_strings()),
            VectorKind::Factor => {
                let factor = Vector::factor(&self.as_strings(), None)?;
                factor.data
            }
        };
        Ok(Vector {
            data,
            names: self.names.clone(),
        })
    }

    /// `c(...)`: concatenate, promoting to the highest kind present.
    ///
    /// A name given for a part names its single element, or its elements
    /// `name1`, `name2`, ... when it has several.
    pub fn concat(parts: &[(Option<String>, Vector)]) -> VectorResult<Vector> {
        let Some(kind) = parts.iter().map(|(_, v)| v.kind()).max() else {
            return Ok(Vector::empty(VectorKind::Logical));
        };
        let all_factors = parts.iter().all(|(_, v)| v.kind() == VectorKind::Factor);
        let target = match kind {
            VectorKind::Factor if !all_factors => VectorKind::Numeric,
            kind => kind,
        };

        let has_names = parts
            .iter()
            .any(|(name, v)| name.is_some() || v.names.is_some());
        let mut names = Vec::new();
        if has_names {
            for (name, v) in parts {
                match (name, &v.names) {
                    (Some(name), _) if v.len() == 1 => names.push(name.clone()),
                    (Some(name), _) => {
                        names.extend((1..=v.len()).map(|i| format!("{name}{i}")));
                    }
                    (None, Some(own)) => names.extend(own.iter().cloned()),
                    (None, None) => names.extend(std::iter::repeat(String::new()).take(v.len())),
                }
            }
        }

        let data = match target {
            VectorKind::Logical => {
                let mut out = Vec::new();
                for (_, v) in parts {
                    out.extend(v.as_bools()?);
                }
                VectorData::Logical(out)
            }
            VectorKind::Numeric | VectorKind::DateTime => {
                let mut out = Vec::new();
                for (_, v) in parts {
                    out.extend(v.as_f64s()?);
                }
                if target == VectorKind::DateTime {
                    VectorData::DateTime(out)
                } else {
                    VectorData::Numeric(out)
                }
            }
            VectorKind::Character => VectorData::Character(
                parts.iter().flat_map(|(_, v)| v.as_strings()).collect(),
            ),
            VectorKind::Factor => {
                let values: Vec<String> = parts.iter().flat_map(|(_, v)| v.as_strings()).collect();
                let mut levels: Vec<String> = Vec::new();
                for (_, v) in parts {
                    for level in v.levels().unwrap_or_default() {
                        if !levels.contains(level) {
                            levels.push(level.clone());
                        }
                    }
                }
                Vector::factor(&values, Some(levels))?.data
            }
        };
        Ok(Vector {
            data,
            names: has_names.then_some(names),
        })
    }

    // ===== Element selection =====

    /// Elements at 0-based `positions` (all in range), keeping kind and names.
    pub(crate) fn select(&self, positions: &[usize]) -> Vector {
        fn pick<T: Clone>(values: &[T], positions: &[usize]) -> Vec<T> {
            positions.iter().map(|&i| values[i].clone()).collect()
        }
        let data = match &self.data {
            VectorData::Numeric(v) => VectorData::Numeric(pick(v, positions)),
            VectorData::DateTime(v) => VectorData::DateTime(pick(v, positions)),
            VectorData::Logical(v) => VectorData::Logical(pick(v, positions)),
            VectorData::Character(v) => VectorData::Character(pick(v, positions)),
            VectorData::Factor { codes, levels } => VectorData::Factor {
                codes: pick(codes, positions),
                levels: levels.clone(),
            },
        };
        Vector {
            data,
            names: self.names.as_ref().map(|n| pick(n, positions)),
        }
    }
}

fn level_label(levels: &[String], code: u32) -> String {
    (code as usize)
        .checked_sub(1)
        .and_then(|i| levels.get(i))
        .cloned()
        .unwrap_or_default()
}

/// Parse a string the way `as.numeric` does.
pub(crate) fn parse_number(s: &str) -> Option<f64> {
    match s.trim() {
        "Inf" => Some(f64::INFINITY),
        "-Inf" => Some(f64::NEG_INFINITY),
        "NaN" => Some(f64::NAN),
        trimmed => trimmed.parse().ok(),
    }
}
