//! Expressions: precedence climbing over R's operator table.

use rho_ir::{canonicalize_assignment, Arg, ExprId, ExprKind, Span};
use rho_lexer::{Token, TokenKind};
use rho_stack::ensure_sufficient_stack;

use super::{Group, PResult, Parser};
use crate::ParseError;

/// Right binding power of prefix `!`.
const PREFIX_NOT: u8 = 11;
/// Right binding power of prefix `-` and `+`.
const PREFIX_SIGN: u8 = 23;

/// `(left, right)` binding powers; right < left means right-associative.
fn infix_binding_power(kind: TokenKind) -> Option<(u8, u8)> {
    Some(match kind {
        TokenKind::Equals => (2, 1),
        TokenKind::LeftAssign | TokenKind::SuperAssign => (4, 3),
        TokenKind::RightAssign | TokenKind::RightSuperAssign => (5, 6),
        TokenKind::Pipe | TokenKind::PipePipe => (7, 8),
        TokenKind::Amp | TokenKind::AmpAmp => (9, 10),
        TokenKind::EqEq
        | TokenKind::NotEq
        | TokenKind::Lt
        | TokenKind::Gt
        | TokenKind::LtEq
        | TokenKind::GtEq => (13, 14),
        TokenKind::Plus | TokenKind::Minus => (15, 16),
        TokenKind::Star | TokenKind::Slash => (17, 18),
        TokenKind::Special(_) => (19, 20),
        TokenKind::Colon => (21, 22),
        TokenKind::Caret => (26, 25),
        _ => return None,
    })
}

impl Parser<'_> {
    pub(super) fn expr(&mut self, min_bp: u8) -> PResult<ExprId> {
        ensure_sufficient_stack(|| self.expr_inner(min_bp))
    }

    fn expr_inner(&mut self, min_bp: u8) -> PResult<ExprId> {
        let mut lhs = self.prefix()?;
        loop {
            let token = self.current();
            lhs = match token.kind {
                TokenKind::LParen => self.call(lhs)?,
                TokenKind::LBracket => self.index(lhs, "[")?,
                TokenKind::DoubleLBracket => self.index(lhs, "[[")?,
                TokenKind::Dollar => self.dollar(lhs)?,
                kind => {
                    let Some((left, right)) = infix_binding_power(kind) else {
                        break;
                    };
                    if left < min_bp {
                        break;
                    }
                    self.advance();
                    self.skip_newlines();
                    let rhs = self.expr(right)?;
                    self.binary(token, lhs, rhs)?
                }
            };
        }
        Ok(lhs)
    }

    fn prefix(&mut self) -> PResult<ExprId> {
        let token = self.current();
        let span = token.span;
        match token.kind {
            TokenKind::Number(value) => {
                self.advance();
                Ok(self.alloc(ExprKind::Number(value), span))
            }
            TokenKind::Str(value) => {
                self.advance();
                Ok(self.alloc(ExprKind::Str(value), span))
            }
            TokenKind::True | TokenKind::False => {
                self.advance();
                Ok(self.alloc(ExprKind::Bool(token.kind == TokenKind::True), span))
            }
            TokenKind::Null => {
                self.advance();
                Ok(self.alloc(ExprKind::Null, span))
            }
            TokenKind::Dots => {
                self.advance();
                Ok(self.alloc(ExprKind::Dots, span))
            }
            TokenKind::Ident(name) => {
                self.advance();
                Ok(self.alloc(ExprKind::Ident(name), span))
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.in_group(Group::Paren, |p| {
                    let inner = p.expr(0)?;
                    p.expect(TokenKind::RParen, "')'")?;
                    Ok(inner)
                })?;
                let span = span.merge(self.prev_span);
                Ok(self.alloc(ExprKind::Paren(inner), span))
            }
            TokenKind::LBrace => self.block(),
            TokenKind::Function | TokenKind::Backslash => self.function(),
            TokenKind::If => self.if_expr(),
            TokenKind::Minus | TokenKind::Plus => self.unary(token, PREFIX_SIGN),
            TokenKind::Bang => self.unary(token, PREFIX_NOT),
            _ => Err(self.unexpected()),
        }
    }

    fn unary(&mut self, op: Token, bp: u8) -> PResult<ExprId> {
        self.advance();
        self.skip_newlines();
        let operand = self.expr(bp)?;
        let name = op.kind.operator_name().unwrap_or_default();
        let func = self.ident(name, op.span);
        let args = self.arena.alloc_args([Arg {
            name: None,
            value: operand,
            span: self.arena.get_expr(operand).span,
        }]);
        let span = op.span.merge(self.prev_span);
        Ok(self.alloc(ExprKind::Call { func, args }, span))
    }

    fn binary(&mut self, op: Token, lhs: ExprId, rhs: ExprId) -> PResult<ExprId> {
        match op.kind {
            TokenKind::LeftAssign | TokenKind::Equals => self.assign(lhs, rhs, false),
            TokenKind::SuperAssign => self.assign(lhs, rhs, true),
            TokenKind::RightAssign => self.assign(rhs, lhs, false),
            TokenKind::RightSuperAssign => self.assign(rhs, lhs, true),
            TokenKind::Colon => {
                let span = self.span_from(lhs);
                Ok(self.alloc(ExprKind::Range { from: lhs, to: rhs }, span))
            }
            TokenKind::Special(name) => {
                let func = self.alloc(ExprKind::Ident(name), op.span);
                Ok(self.binary_call(func, lhs, rhs))
            }
            kind => {
                let name = kind.operator_name().unwrap_or_default();
                let func = self.ident(name, op.span);
                Ok(self.binary_call(func, lhs, rhs))
            }
        }
    }

    fn binary_call(&mut self, func: ExprId, lhs: ExprId, rhs: ExprId) -> ExprId {
        let lhs_span = self.arena.get_expr(lhs).span;
        let rhs_span = self.arena.get_expr(rhs).span;
        let args = self.arena.alloc_args([
            Arg {
                name: None,
                value: lhs,
                span: lhs_span,
            },
            Arg {
                name: None,
                value: rhs,
                span: rhs_span,
            },
        ]);
        self.alloc(ExprKind::Call { func, args }, lhs_span.merge(rhs_span))
    }

    fn assign(&mut self, target: ExprId, value: ExprId, inherited: bool) -> PResult<ExprId> {
        let span = self
            .arena
            .get_expr(target)
            .span
            .merge(self.arena.get_expr(value).span);
        let canonical = canonicalize_assignment(&mut self.arena, self.interner, target, value)
            .map_err(|error| ParseError::Lvalue { error, span })?;
        let kind = if inherited {
            ExprKind::AssignInherited {
                target: canonical.target,
                value: canonical.value,
            }
        } else {
            ExprKind::Assign {
                target: canonical.target,
                value: canonical.value,
            }
        };
        Ok(self.alloc(kind, span))
    }

    fn block(&mut self) -> PResult<ExprId> {
        let open = self.advance().span;
        let exprs = self.in_group(Group::Brace, |p| {
            p.skip_separators();
            if p.check(TokenKind::RBrace) {
                return Err(ParseError::EmptyBlock {
                    span: open.merge(p.current().span),
                });
            }
            let mut exprs = Vec::new();
            loop {
                exprs.push(p.expr(0)?);
                match p.current().kind {
                    TokenKind::Newline | TokenKind::Semicolon => {
                        p.skip_separators();
                        if p.check(TokenKind::RBrace) {
                            break;
                        }
                    }
                    TokenKind::RBrace => break,
                    _ => return Err(p.expected("'}'")),
                }
            }
            p.expect(TokenKind::RBrace, "'}'")?;
            Ok(exprs)
        })?;
        let list = self.arena.alloc_expr_list(exprs);
        let span = open.merge(self.prev_span);
        Ok(self.alloc(ExprKind::Block(list), span))
    }

    fn function(&mut self) -> PResult<ExprId> {
        let start = self.advance().span;
        self.expect(TokenKind::LParen, "'('")?;
        let params = self.in_group(Group::Paren, |p| {
            let params = p.params()?;
            p.expect(TokenKind::RParen, "')'")?;
            Ok(params)
        })?;
        self.skip_newlines();
        let body = self.expr(0)?;
        let params = self.arena.alloc_params(params);
        let span = start.merge(self.prev_span);
        Ok(self.alloc(ExprKind::Function { params, body }, span))
    }

    fn if_expr(&mut self) -> PResult<ExprId> {
        let start = self.advance().span;
        self.expect(TokenKind::LParen, "'('")?;
        let cond = self.in_group(Group::Paren, |p| {
            let cond = p.expr(0)?;
            p.expect(TokenKind::RParen, "')'")?;
            Ok(cond)
        })?;
        self.skip_newlines();
        let then = self.expr(0)?;
        let else_ = if self.check_else() {
            self.advance();
            self.skip_newlines();
            Some(self.expr(0)?)
        } else {
            None
        };
        let span = start.merge(self.prev_span);
        Ok(self.alloc(ExprKind::If { cond, then, else_ }, span))
    }

    fn dollar(&mut self, object: ExprId) -> PResult<ExprId> {
        let op = self.advance();
        self.skip_newlines();
        let token = self.current();
        let field = match token.kind {
            TokenKind::Ident(name) | TokenKind::Str(name) => {
                self.advance();
                self.alloc(ExprKind::Str(name), token.span)
            }
            _ => return Err(self.expected("name after '$'")),
        };
        let func = self.ident("$", op.span);
        Ok(self.binary_call(func, object, field))
    }

    /// Zero-width span at the current token, for empty argument slots.
    pub(super) fn empty_span(&self) -> Span {
        let start = self.current().span.start;
        Span::new(start, start)
    }
}
