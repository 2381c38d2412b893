//! Argument lists, formal parameter lists and the call-shaped special forms.

use rho_ir::{Arg, ExprId, ExprKind, Param};
use rho_lexer::TokenKind;

use super::{Group, PResult, Parser};
use crate::ParseError;

impl Parser<'_> {
    /// `func(args)`. Also recognizes `library(pkg)` and `quote(expr)`.
    pub(super) fn call(&mut self, func: ExprId) -> PResult<ExprId> {
        self.advance();
        let args = self.in_group(Group::Paren, |p| {
            let args = p.args(TokenKind::RParen)?;
            p.expect(TokenKind::RParen, "')'")?;
            Ok(args)
        })?;
        let span = self.span_from(func);
        if let Some(kind) = self.special_form(func, &args) {
            return Ok(self.alloc(kind, span));
        }
        let args = self.arena.alloc_args(args);
        Ok(self.alloc(ExprKind::Call { func, args }, span))
    }

    /// `object[args]` and `object[[args]]`.
    pub(super) fn index(&mut self, object: ExprId, op: &str) -> PResult<ExprId> {
        let open = self.advance().span;
        let double = op == "[[";
        let rest = self.in_group(Group::Paren, |p| {
            let args = p.args(TokenKind::RBracket)?;
            p.expect(TokenKind::RBracket, "']'")?;
            if double {
                p.expect(TokenKind::RBracket, "']'")?;
            }
            Ok(args)
        })?;
        let func = self.ident(op, open);
        let object_arg = Arg {
            name: None,
            value: object,
            span: self.arena.get_expr(object).span,
        };
        let args = self
            .arena
            .alloc_args(std::iter::once(object_arg).chain(rest));
        let span = self.span_from(object);
        Ok(self.alloc(ExprKind::Call { func, args }, span))
    }

    fn args(&mut self, close: TokenKind) -> PResult<Vec<Arg>> {
        let mut args = Vec::new();
        if self.check(close) {
            return Ok(args);
        }
        loop {
            args.push(self.arg(close)?);
            if !self.check(TokenKind::Comma) {
                return Ok(args);
            }
            self.advance();
        }
    }

    fn arg(&mut self, close: TokenKind) -> PResult<Arg> {
        let token = self.current();
        if token.kind == TokenKind::Comma || token.kind == close {
            return Ok(self.missing_arg(None));
        }
        let name = match token.kind {
            TokenKind::Ident(name) | TokenKind::Str(name) => Some(name),
            TokenKind::Null => Some(self.interner.intern("NULL")),
            _ => None,
        };
        if let Some(name) = name {
            if self.peek_kind() == TokenKind::Equals {
                self.advance();
                self.advance();
                if self.check(TokenKind::Comma) || self.check(close) {
                    return Ok(self.missing_arg(Some(name)));
                }
                let value = self.expr(0)?;
                return Ok(Arg {
                    name: Some(name),
                    value,
                    span: token.span.merge(self.prev_span),
                });
            }
        }
        let value = self.expr(0)?;
        Ok(Arg {
            name: None,
            value,
            span: token.span.merge(self.prev_span),
        })
    }

    fn missing_arg(&mut self, name: Option<rho_ir::Name>) -> Arg {
        let span = self.empty_span();
        let value = self.alloc(ExprKind::Missing, span);
        Arg { name, value, span }
    }

    /// Formals up to (not including) the closing paren.
    pub(super) fn params(&mut self) -> PResult<Vec<Param>> {
        let mut params: Vec<Param> = Vec::new();
        if self.check(TokenKind::RParen) {
            return Ok(params);
        }
        loop {
            let token = self.current();
            let name = match token.kind {
                TokenKind::Ident(name) => name,
                TokenKind::Dots => self.interner.intern("..."),
                _ => return Err(self.expected("formal argument")),
            };
            self.advance();
            if params.iter().any(|p| p.name == name) {
                return Err(ParseError::RepeatedFormal {
                    name: self.interner.lookup(name).to_owned(),
                    span: token.span,
                });
            }
            let default = if self.check(TokenKind::Equals) {
                self.advance();
                Some(self.expr(0)?)
            } else {
                None
            };
            params.push(Param {
                name,
                default,
                span: token.span.merge(self.prev_span),
            });
            if !self.check(TokenKind::Comma) {
                return Ok(params);
            }
            self.advance();
        }
    }

    /// `library(x)`, `library("x")` and `quote(e)` get their own node kinds.
    fn special_form(&self, func: ExprId, args: &[Arg]) -> Option<ExprKind> {
        let ExprKind::Ident(name) = self.arena.get_expr(func).kind else {
            return None;
        };
        let [arg] = args else {
            return None;
        };
        if arg.name.is_some() {
            return None;
        }
        match self.interner.lookup(name) {
            "library" => match self.arena.get_expr(arg.value).kind {
                ExprKind::Ident(pkg) | ExprKind::Str(pkg) => Some(ExprKind::Library(pkg)),
                _ => None,
            },
            "quote" => Some(ExprKind::Quote(arg.value)),
            _ => None,
        }
    }
}
