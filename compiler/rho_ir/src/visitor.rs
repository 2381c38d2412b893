//! Double-dispatch traversal over node kinds.
//!
//! Implementors provide one method per node kind. None of them has a
//! default, so adding a kind to [`ExprKind`] breaks every traversal until it
//! handles the new kind. `visit_expr` does the dispatch.
//!
//! # Example
//!
//! ```text
//! struct CountCalls<'a> { arena: &'a ExprArena, count: usize }
//!
//! impl ExprVisitor for CountCalls<'_> {
//!     type Output = ();
//!     fn arena(&self) -> &ExprArena { self.arena }
//!     fn visit_call(&mut self, _: ExprId, func: ExprId, args: ArgRange, _: Span) {
//!         self.count += 1;
//!         self.visit_expr(func);
//!         // ...
//!     }
//!     // ...
//! }
//! ```

use super::ast::{ArgRange, ExprKind, ParamRange};
use super::{ExprArena, ExprId, ExprRange, Name, Span};

/// Visitor with one capability per node kind.
pub trait ExprVisitor {
    type Output;

    /// Arena the visited ids belong to.
    fn arena(&self) -> &ExprArena;

    /// Dispatch on the kind of `id`.
    fn visit_expr(&mut self, id: ExprId) -> Self::Output {
        let expr = *self.arena().get_expr(id);
        let span = expr.span;
        match expr.kind {
            ExprKind::Number(value) => self.visit_number(value, span),
            ExprKind::Str(value) => self.visit_str(value, span),
            ExprKind::Bool(value) => self.visit_bool(value, span),
            ExprKind::Null => self.visit_null(span),
            ExprKind::Missing => self.visit_missing(span),
            ExprKind::Ident(name) => self.visit_ident(name, span),
            ExprKind::Dots => self.visit_dots(span),
            ExprKind::Assign { target, value } => self.visit_assign(target, value, span),
            ExprKind::AssignInherited { target, value } => {
                self.visit_assign_inherited(target, value, span)
            }
            ExprKind::Function { params, body } => self.visit_function(id, params, body, span),
            ExprKind::Call { func, args } => self.visit_call(id, func, args, span),
            ExprKind::Block(exprs) => self.visit_block(exprs, span),
            ExprKind::Range { from, to } => self.visit_range(from, to, span),
            ExprKind::Library(name) => self.visit_library(name, span),
            ExprKind::Paren(inner) => self.visit_paren(inner, span),
            ExprKind::If { cond, then, else_ } => self.visit_if(cond, then, else_, span),
            ExprKind::Quote(inner) => self.visit_quote(inner, span),
            ExprKind::Error(message) => self.visit_error(message, span),
        }
    }

    fn visit_number(&mut self, value: f64, span: Span) -> Self::Output;
    fn visit_str(&mut self, value: Name, span: Span) -> Self::Output;
    fn visit_bool(&mut self, value: bool, span: Span) -> Self::Output;
    fn visit_null(&mut self, span: Span) -> Self::Output;
    fn visit_missing(&mut self, span: Span) -> Self::Output;
    fn visit_ident(&mut self, name: Name, span: Span) -> Self::Output;
    fn visit_dots(&mut self, span: Span) -> Self::Output;
    fn visit_assign(&mut self, target: ExprId, value: ExprId, span: Span) -> Self::Output;
    fn visit_assign_inherited(&mut self, target: ExprId, value: ExprId, span: Span)
        -> Self::Output;
    fn visit_function(
        &mut self,
        id: ExprId,
        params: ParamRange,
        body: ExprId,
        span: Span,
    ) -> Self::Output;
    fn visit_call(&mut self, id: ExprId, func: ExprId, args: ArgRange, span: Span)
        -> Self::Output;
    fn visit_block(&mut self, exprs: ExprRange, span: Span) -> Self::Output;
    fn visit_range(&mut self, from: ExprId, to: ExprId, span: Span) -> Self::Output;
    fn visit_library(&mut self, name: Name, span: Span) -> Self::Output;
    fn visit_paren(&mut self, inner: ExprId, span: Span) -> Self::Output;
    fn visit_if(
        &mut self,
        cond: ExprId,
        then: ExprId,
        else_: Option<ExprId>,
        span: Span,
    ) -> Self::Output;
    fn visit_quote(&mut self, inner: ExprId, span: Span) -> Self::Output;
    fn visit_error(&mut self, message: Name, span: Span) -> Self::Output;
}
