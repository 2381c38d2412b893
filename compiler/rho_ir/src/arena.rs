//! Arena allocation for the flat AST.

#![expect(
    clippy::disallowed_types,
    reason = "Arc is the implementation of SharedArena"
)]

use std::fmt;
use std::sync::Arc;

use super::ast::{Arg, ArgRange, Expr, Param, ParamRange};
use super::{ExprId, ExprRange};

/// Contiguous storage for all expressions of one parse unit.
///
/// Child references are `ExprId` indices; lists live in side tables and are
/// referenced by ranges.
#[derive(Clone, Default)]
pub struct ExprArena {
    exprs: Vec<Expr>,
    expr_lists: Vec<ExprId>,
    params: Vec<Param>,
    args: Vec<Arg>,
}

impl ExprArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Heuristic: ~1 expression per 4 bytes of source.
    pub fn with_capacity(source_len: usize) -> Self {
        let estimated = source_len / 4;
        ExprArena {
            exprs: Vec::with_capacity(estimated),
            expr_lists: Vec::with_capacity(estimated / 4),
            params: Vec::with_capacity(estimated / 16),
            args: Vec::with_capacity(estimated / 4),
        }
    }

    // ===== Expressions =====

    #[inline]
    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(self.exprs.len() as u32);
        self.exprs.push(expr);
        id
    }

    /// # Panics
    /// Panics if `id` was not allocated in this arena.
    #[inline]
    #[track_caller]
    pub fn get_expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    /// Checked lookup, for ids that crossed an API boundary.
    #[inline]
    pub fn try_get_expr(&self, id: ExprId) -> Option<&Expr> {
        self.exprs.get(id.index())
    }

    #[inline]
    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    // ===== Lists =====

    pub fn alloc_expr_list(&mut self, exprs: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = self.expr_lists.len() as u32;
        self.expr_lists.extend(exprs);
        let len = (self.expr_lists.len() as u32 - start) as u16;
        ExprRange::new(start, len)
    }

    #[inline]
    pub fn get_expr_list(&self, range: ExprRange) -> &[ExprId] {
        &self.expr_lists[range.as_range()]
    }

    pub fn alloc_params(&mut self, params: impl IntoIterator<Item = Param>) -> ParamRange {
        let start = self.params.len() as u32;
        self.params.extend(params);
        let len = (self.params.len() as u32 - start) as u16;
        ParamRange(ExprRange::new(start, len))
    }

    #[inline]
    pub fn get_params(&self, range: ParamRange) -> &[Param] {
        &self.params[range.0.as_range()]
    }

    pub fn alloc_args(&mut self, args: impl IntoIterator<Item = Arg>) -> ArgRange {
        let start = self.args.len() as u32;
        self.args.extend(args);
        let len = (self.args.len() as u32 - start) as u16;
        ArgRange(ExprRange::new(start, len))
    }

    #[inline]
    pub fn get_args(&self, range: ArgRange) -> &[Arg] {
        &self.args[range.0.as_range()]
    }
}

impl fmt::Debug for ExprArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExprArena")
            .field("exprs", &self.exprs.len())
            .field("params", &self.params.len())
            .field("args", &self.args.len())
            .finish()
    }
}

/// Shared, immutable arena.
///
/// Closures, promises and quoted expressions carry the arena their nodes
/// live in, so a value can outlive the parse that produced it.
#[derive(Clone)]
pub struct SharedArena(Arc<ExprArena>);

impl SharedArena {
    pub fn new(arena: ExprArena) -> Self {
        SharedArena(Arc::new(arena))
    }

    /// Whether both handles point at the same arena.
    pub fn ptr_eq(&self, other: &SharedArena) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl std::ops::Deref for SharedArena {
    type Target = ExprArena;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Debug for SharedArena {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SharedArena({:?})", &*self.0)
    }
}
