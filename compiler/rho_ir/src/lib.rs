//! Rho IR - syntax tree types shared by the parser and the evaluator.
//!
//! # Architecture
//!
//! - `Name`/`StringInterner`: every identifier and string literal is interned
//! - `ExprArena`: flat storage, children referenced by `ExprId`
//! - `ExprVisitor`: one method per node kind, dispatched exhaustively
//! - `Deparser`: a second traversal that turns nodes back into source text
//! - `lvalue`: rewrites complex assignment targets into canonical form
//!
//! Nodes are immutable once allocated. Transforms allocate new nodes.

mod arena;
mod ast;
mod deparse;
mod expr_id;
mod interner;
mod lvalue;
mod name;
mod span;
mod visitor;

pub use arena::{ExprArena, SharedArena};
pub use ast::{Arg, ArgRange, Expr, ExprKind, Param, ParamRange};
pub use deparse::{deparse, format_number, is_syntactic_name, quote_string, Deparser};
pub use expr_id::{ExprId, ExprRange};
pub use interner::{SharedInterner, StringInterner};
pub use lvalue::{canonicalize_assignment, Canonical, LvalueError};
pub use name::Name;
pub use span::{Position, Span};
pub use visitor::ExprVisitor;
