//! Rho parser.
//!
//! Turns source text into top-level expression nodes in a fresh
//! [`ExprArena`]. Operators become calls (`a + b` is `` `+`(a, b) ``), complex
//! assignment targets are canonicalized, and statements that fail to parse
//! become `Error` nodes so the rest of the unit still runs.

mod error;
mod parser;

pub use error::ParseError;
pub use parser::Parser;

use rho_ir::{ExprArena, ExprId, StringInterner};

/// Result of parsing one unit of source text.
#[derive(Debug)]
pub struct ParseOutput {
    pub arena: ExprArena,
    /// One node per top-level statement, in source order.
    pub exprs: Vec<ExprId>,
    pub errors: Vec<ParseError>,
}

impl ParseOutput {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Lex and parse `source`.
pub fn parse(source: &str, interner: &StringInterner) -> ParseOutput {
    let tokens = rho_lexer::lex(source, interner);
    Parser::new(tokens, interner, source.len()).parse_program()
}

#[cfg(test)]
mod tests;
