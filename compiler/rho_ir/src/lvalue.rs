//! Canonical form for complex assignment targets.
//!
//! `f(x, i) <- v` is rewritten as `` x <- `f<-`(x, i, value = v) ``, repeatedly,
//! until the target is a plain symbol:
//!
//! ```text
//! names(x)[2] <- "b"
//! x <- `names<-`(x, value = `[<-`(names(x), 2, value = "b"))
//! ```
//!
//! The rewrite allocates new nodes and leaves the original target alone.

use super::ast::Arg;
use super::{Expr, ExprArena, ExprId, ExprKind, StringInterner};

/// Why an assignment target could not be canonicalized.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LvalueError {
    #[error("invalid (do_set) left-hand side to assignment")]
    InvalidTarget,
    #[error("invalid function in complex assignment")]
    InvalidFunction,
    #[error("invalid (NULL) left side of assignment")]
    NoTargetArgument,
}

/// Canonicalized assignment: `target` is an `Ident` or `Str` node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Canonical {
    pub target: ExprId,
    pub value: ExprId,
}

/// Rewrite `target <- value` until `target` is a symbol.
pub fn canonicalize_assignment(
    arena: &mut ExprArena,
    interner: &StringInterner,
    mut target: ExprId,
    mut value: ExprId,
) -> Result<Canonical, LvalueError> {
    let value_name = interner.intern("value");
    loop {
        let expr = *arena.get_expr(target);
        match expr.kind {
            ExprKind::Ident(_) | ExprKind::Str(_) => return Ok(Canonical { target, value }),
            ExprKind::Call { func, args } => {
                let setter = match arena.get_expr(func).kind {
                    ExprKind::Ident(name) | ExprKind::Str(name) => {
                        interner.intern(&format!("{}<-", interner.lookup(name)))
                    }
                    _ => return Err(LvalueError::InvalidFunction),
                };
                let actuals: Vec<Arg> = arena.get_args(args).to_vec();
                let Some(first) = actuals.first().copied() else {
                    return Err(LvalueError::NoTargetArgument);
                };
                let value_span = arena.get_expr(value).span;
                let span = expr.span.merge(value_span);

                let setter_id = arena.alloc_expr(Expr::new(
                    ExprKind::Ident(setter),
                    arena.get_expr(func).span,
                ));
                let new_args = arena.alloc_args(actuals.into_iter().chain(std::iter::once(Arg {
                    name: Some(value_name),
                    value,
                    span: value_span,
                })));
                value = arena.alloc_expr(Expr::new(
                    ExprKind::Call {
                        func: setter_id,
                        args: new_args,
                    },
                    span,
                ));
                target = first.value;
            }
            _ => return Err(LvalueError::InvalidTarget),
        }
    }
}
