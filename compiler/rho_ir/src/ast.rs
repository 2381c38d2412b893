//! Syntax tree node types.
//!
//! Every node kind carries only its own fields plus the [`Span`] on the
//! enclosing [`Expr`]. Operators are not node kinds: `a + b` is a call to
//! the function named `+`.

use super::{ExprId, ExprRange, Name, Span};

/// An expression node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub const fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

/// Node kinds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ExprKind {
    /// Numeric literal (`1`, `2.5`, `Inf`).
    Number(f64),
    /// String literal.
    Str(Name),
    /// `TRUE` / `FALSE`.
    Bool(bool),
    /// `NULL`.
    Null,
    /// An empty argument slot, as in `x[1, ]`.
    Missing,
    /// Variable reference.
    Ident(Name),
    /// `...` inside an argument list.
    Dots,
    /// `target <- value` or `target = value`. `target` is an `Ident` or `Str`
    /// after canonicalization.
    Assign { target: ExprId, value: ExprId },
    /// `target <<- value`.
    AssignInherited { target: ExprId, value: ExprId },
    /// `function(params) body`.
    Function { params: ParamRange, body: ExprId },
    /// `func(args)`.
    Call { func: ExprId, args: ArgRange },
    /// `{ e1; e2 }`. Never empty.
    Block(ExprRange),
    /// `from:to`.
    Range { from: ExprId, to: ExprId },
    /// `library(name)`.
    Library(Name),
    /// `(inner)`.
    Paren(ExprId),
    /// `if (cond) then else else_`.
    If {
        cond: ExprId,
        then: ExprId,
        else_: Option<ExprId>,
    },
    /// `quote(expr)`.
    Quote(ExprId),
    /// A statement the parser could not read. Carries the message.
    Error(Name),
}

/// A formal parameter.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Param {
    pub name: Name,
    pub default: Option<ExprId>,
    pub span: Span,
}

/// An actual argument at a call site.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Arg {
    pub name: Option<Name>,
    pub value: ExprId,
    pub span: Span,
}

/// Range of [`Param`]s in the arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ParamRange(pub(crate) ExprRange);

impl ParamRange {
    pub const EMPTY: ParamRange = ParamRange(ExprRange::EMPTY);

    #[inline]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Range of [`Arg`]s in the arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct ArgRange(pub(crate) ExprRange);

impl ArgRange {
    pub const EMPTY: ArgRange = ArgRange(ExprRange::EMPTY);

    #[inline]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
