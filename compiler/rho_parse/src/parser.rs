//! Parser state, token access and error recovery.
//!
//! Newline handling follows R: inside `( )` and `[ ]` newlines are
//! whitespace; at top level and inside `{ }` they end an expression that is
//! already complete. A binary operator at the end of a line continues the
//! expression on the next one.

mod args;
mod expr;

use rho_ir::{Expr, ExprArena, ExprId, ExprKind, Span, StringInterner};
use rho_lexer::{LexError, Token, TokenKind, TokenList};
use tracing::{debug, trace};

use crate::{ParseError, ParseOutput};

pub(crate) type PResult<T> = Result<T, ParseError>;

/// Bracketing context, innermost last.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Group {
    TopLevel,
    Brace,
    Paren,
}

/// Recursive descent parser over a token list.
pub struct Parser<'i> {
    tokens: Vec<Token>,
    lex_errors: Vec<LexError>,
    interner: &'i StringInterner,
    arena: ExprArena,
    pos: usize,
    prev_span: Span,
    groups: Vec<Group>,
    errors: Vec<ParseError>,
}

impl<'i> Parser<'i> {
    pub fn new(list: TokenList, interner: &'i StringInterner, source_len: usize) -> Self {
        let mut tokens = list.tokens;
        if !matches!(tokens.last(), Some(t) if t.kind == TokenKind::Eof) {
            let end = tokens.last().map_or(Span::DUMMY, |t| t.span);
            tokens.push(Token::new(TokenKind::Eof, Span::new(end.end, end.end)));
        }
        Parser {
            tokens,
            lex_errors: list.errors,
            interner,
            arena: ExprArena::with_capacity(source_len),
            pos: 0,
            prev_span: Span::DUMMY,
            groups: vec![Group::TopLevel],
            errors: Vec::new(),
        }
    }

    /// Parse every top-level statement.
    pub fn parse_program(mut self) -> ParseOutput {
        let mut exprs = Vec::new();
        loop {
            self.skip_separators();
            if self.at_eof() {
                break;
            }
            let start = self.current().span;
            match self.statement() {
                Ok(id) => exprs.push(id),
                Err(err) => {
                    trace!(error = %err, "recovering from parse error");
                    exprs.push(self.error_node(&err, start));
                    self.errors.push(err);
                    self.recover();
                }
            }
        }
        debug!(
            exprs = exprs.len(),
            errors = self.errors.len(),
            "parsed unit"
        );
        ParseOutput {
            arena: self.arena,
            exprs,
            errors: self.errors,
        }
    }

    fn statement(&mut self) -> PResult<ExprId> {
        let id = self.expr(0)?;
        match self.current().kind {
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::Eof => Ok(id),
            _ => Err(self.unexpected()),
        }
    }

    // ===== Token access =====

    fn newlines_significant(&self) -> bool {
        !matches!(self.groups.last(), Some(Group::Paren))
    }

    fn current_index(&self) -> usize {
        let mut i = self.pos;
        if !self.newlines_significant() {
            while self.tokens[i].kind == TokenKind::Newline {
                i += 1;
            }
        }
        i
    }

    fn current(&self) -> Token {
        self.tokens[self.current_index()]
    }

    /// The token after the current one.
    fn peek_kind(&self) -> TokenKind {
        let mut i = self.current_index();
        if self.tokens[i].kind == TokenKind::Eof {
            return TokenKind::Eof;
        }
        i += 1;
        if !self.newlines_significant() {
            while self.tokens[i].kind == TokenKind::Newline {
                i += 1;
            }
        }
        self.tokens[i].kind
    }

    fn advance(&mut self) -> Token {
        let i = self.current_index();
        let token = self.tokens[i];
        self.pos = if token.kind == TokenKind::Eof { i } else { i + 1 };
        self.prev_span = token.span;
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn at_eof(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    fn expect(&mut self, kind: TokenKind, expected: &'static str) -> PResult<Span> {
        if self.check(kind) {
            Ok(self.advance().span)
        } else {
            Err(self.expected(expected))
        }
    }

    fn skip_newlines(&mut self) {
        while self.tokens[self.pos].kind == TokenKind::Newline {
            self.pos += 1;
        }
    }

    fn skip_separators(&mut self) {
        while matches!(
            self.tokens[self.pos].kind,
            TokenKind::Newline | TokenKind::Semicolon
        ) {
            self.pos += 1;
        }
    }

    /// `else` may follow a newline only inside braces.
    fn check_else(&mut self) -> bool {
        if self.check(TokenKind::Else) {
            return true;
        }
        if self.groups.last() != Some(&Group::Brace) {
            return false;
        }
        let mut i = self.pos;
        while self.tokens[i].kind == TokenKind::Newline {
            i += 1;
        }
        if self.tokens[i].kind == TokenKind::Else {
            self.pos = i;
            return true;
        }
        false
    }

    /// Run `f` inside a bracketing group. On error the group stays pushed so
    /// recovery knows how deep it is.
    fn in_group<T>(&mut self, group: Group, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        self.groups.push(group);
        let out = f(self)?;
        self.groups.pop();
        Ok(out)
    }

    // ===== Node construction =====

    fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    fn ident(&mut self, name: &str, span: Span) -> ExprId {
        let name = self.interner.intern(name);
        self.alloc(ExprKind::Ident(name), span)
    }

    fn span_from(&self, id: ExprId) -> Span {
        self.arena.get_expr(id).span.merge(self.prev_span)
    }

    // ===== Errors =====

    fn describe(&self, token: Token) -> String {
        match token.kind {
            TokenKind::Ident(name) => format!("symbol '{}'", self.interner.lookup(name)),
            TokenKind::Special(name) => format!("'{}'", self.interner.lookup(name)),
            kind => kind.to_string(),
        }
    }

    fn lex_error_at(&self, token: Token) -> Option<ParseError> {
        self.lex_errors
            .iter()
            .find(|e| e.span() == token.span)
            .map(|e| ParseError::Lex { error: e.clone() })
    }

    fn unexpected(&self) -> ParseError {
        let token = self.current();
        self.lex_error_at(token)
            .unwrap_or_else(|| ParseError::Unexpected {
                found: self.describe(token),
                span: token.span,
            })
    }

    fn expected(&self, expected: &'static str) -> ParseError {
        let token = self.current();
        self.lex_error_at(token)
            .unwrap_or_else(|| ParseError::Expected {
                expected,
                found: self.describe(token),
                span: token.span,
            })
    }

    fn error_node(&mut self, err: &ParseError, start: Span) -> ExprId {
        let message = self.interner.intern(&err.to_string());
        let span = start.merge(err.span());
        self.alloc(ExprKind::Error(message), span)
    }

    /// Skip to the end of the broken statement: the next newline or `;` once
    /// every group open at the error point has closed.
    fn recover(&mut self) {
        let mut depth = self.groups.len().saturating_sub(1);
        self.groups.clear();
        self.groups.push(Group::TopLevel);
        loop {
            match self.tokens[self.pos].kind {
                TokenKind::Eof => return,
                TokenKind::Newline | TokenKind::Semicolon if depth == 0 => return,
                TokenKind::LParen
                | TokenKind::LBrace
                | TokenKind::LBracket
                | TokenKind::DoubleLBracket => depth += 1,
                TokenKind::RParen | TokenKind::RBrace | TokenKind::RBracket => {
                    depth = depth.saturating_sub(1);
                }
                _ => {}
            }
            self.pos += 1;
        }
    }
}
