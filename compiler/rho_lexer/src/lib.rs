//! Rho lexer.
//!
//! A logos scanner produces raw tokens which are then interned and given
//! line/column spans. Comments and horizontal whitespace are dropped;
//! newlines are kept because they terminate expressions.

mod escape;
mod lexer;
mod line_index;
mod token;

pub use lexer::{lex, LexError, TokenList};
pub use line_index::LineIndex;
pub use token::{Token, TokenKind};
