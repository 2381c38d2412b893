//! Rho vector library.
//!
//! Every scalar in the language is a length-one vector. This crate owns the
//! element storage and everything that only looks at elements: recycling
//! arithmetic, comparisons, `seq`, positional and named indexing, coercion
//! and the console rendering. It knows nothing about environments or calls.

mod datetime;
mod error;
mod format;
mod index;
mod ops;
mod seq;
mod vector;

pub use datetime::{format_datetime, parse_datetime};
pub use error::VectorError;
pub use format::{format_numbers, render};
pub use index::Index;
pub use ops::{arith, compare, logical, map1, not, Arith, Comparison, Logic, Mode};
pub use seq::SeqSpec;
pub use vector::{Vector, VectorData, VectorKind, MAX_LENGTH};

pub type VectorResult<T> = Result<T, VectorError>;
