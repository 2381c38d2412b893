//! Parse errors.

use rho_ir::{LvalueError, Span};
use rho_lexer::LexError;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("{error}")]
    Lex { error: LexError },
    #[error("unexpected {found}")]
    Unexpected { found: String, span: Span },
    #[error("expected {expected}, found {found}")]
    Expected {
        expected: &'static str,
        found: String,
        span: Span,
    },
    #[error("empty block")]
    EmptyBlock { span: Span },
    #[error("repeated formal argument '{name}'")]
    RepeatedFormal { name: String, span: Span },
    #[error("{error}")]
    Lvalue { error: LvalueError, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::Lex { error } => error.span(),
            ParseError::Unexpected { span, .. }
            | ParseError::Expected { span, .. }
            | ParseError::EmptyBlock { span }
            | ParseError::RepeatedFormal { span, .. }
            | ParseError::Lvalue { span, .. } => *span,
        }
    }
}
