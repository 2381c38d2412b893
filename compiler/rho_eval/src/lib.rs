//! Evaluation core for the Rho language.
//!
//! # Architecture
//!
//! - [`Value`]: tagged run-time values. Vectors come from `rho_vector`.
//! - [`Environment`]: shared, mutable binding frames linked by enclosure.
//! - [`CallStack`]: active calls, for `parent.frame()` and friends.
//! - [`Interpreter`]: owns the global state and walks syntax trees.
//! - [`PackageRegistry`]: named initializers that `library()` runs.
//!
//! Arguments are lazy: each actual is evaluated at the call site, but
//! defaults are promises forced on first read, in the callee's frame.
//!
//! ```text
//! let mut interp = Interpreter::new();
//! let values = interp.eval_source("f <- function(x, y = x * 2) x + y; f(3)")?;
//! ```

mod builtins;
mod call_stack;
mod environment;
mod errors;
mod interpreter;
mod packages;
mod print_handler;
mod registry;
mod resolver;
mod shared;
mod value;

pub use call_stack::{CallEntry, CallStack};
pub use environment::{Environment, WeakEnvironment};
pub use errors::{ControlAction, EvalError, EvalErrorKind, EvalResult, InternalError};
pub use interpreter::{
    CallContext, CallFrameGuard, EvalConfig, Interpreter, InterpreterBuilder, NativeFn, Outcome,
};
pub use print_handler::{
    buffer_handler, silent_handler, stdout_handler, PrintHandler, SharedPrintHandler,
};
pub use registry::{PackageInit, PackageRegistry, PackageScope};
pub use resolver::{Args, DefaultThunk, ParamResolver, ParamResolverBuilder, ParamSpec, ResolvedArgs, TypeTags};
pub use shared::SharedRegistry;
pub use value::{Builtin, Closure, Lang, ListItem, Package, Promise, Thunk, Value};

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
