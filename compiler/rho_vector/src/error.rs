//! Vector operation errors. Messages match what the console shows.

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum VectorError {
    #[error("non-numeric argument to binary operator")]
    NonNumeric,
    #[error("invalid argument to unary operator")]
    InvalidUnary,
    #[error("non-numeric argument to mathematical function")]
    NonNumericMath,
    #[error("operations are possible only for numeric, logical or complex types")]
    NonLogical,
    #[error("lengths differ ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },
    #[error("cannot coerce type '{from}' to vector of type '{to}'")]
    Coercion {
        from: &'static str,
        to: &'static str,
    },
    #[error("wrong sign in 'by' argument")]
    WrongSignInBy,
    #[error("invalid '(to - from)/by' in seq(.)")]
    InvalidBy,
    #[error("'length.out' must be a non-negative number")]
    InvalidLengthOut,
    #[error("result would be too long a vector")]
    TooLong,
    #[error("too many arguments")]
    TooManySeqArguments,
    #[error("'{0}' must be a finite number")]
    NotFinite(&'static str),
    #[error("subscript out of bounds")]
    SubscriptOutOfBounds,
    #[error("can't mix positive and negative subscripts")]
    MixedSubscripts,
    #[error("invalid subscript type '{0}'")]
    InvalidSubscript(&'static str),
    #[error("attempt to select more than one element")]
    SelectMany,
    #[error("attempt to select less than one element")]
    SelectNone,
    #[error("replacement has length zero")]
    ReplacementLengthZero,
    #[error("more elements supplied than there are to replace")]
    ReplacementTooLong,
    #[error("'names' attribute [{names}] must be the same length as the vector [{len}]")]
    NamesLength { names: usize, len: usize },
    #[error("invalid factor level, NA generated")]
    InvalidFactorLevel,
    #[error("character string is not in a standard unambiguous format")]
    InvalidDateTime,
}
