//! The interpreter: global state plus the tree-walking evaluator.
//!
//! # Architecture
//!
//! - [`Interpreter`] owns everything that outlives one expression: the
//!   interner, the base and global environments, the call stack and the
//!   package registry handle.
//! - `Evaluator` walks one arena in one environment. Nested evaluation
//!   (closure bodies, promise forcing, package sources) builds a fresh
//!   evaluator over the same interpreter.
//! - Errors are values at the top level. Each top-level expression that
//!   fails yields [`Value::Error`] and evaluation moves on to the next.
//!   Only an [`InternalError`] stops a run.

mod builder;
mod call;
mod call_guard;
mod context;
mod eval;

pub use builder::InterpreterBuilder;
pub use call_guard::CallFrameGuard;
pub use context::{CallContext, NativeFn};

use rho_ir::{ExprId, Name, SharedArena, SharedInterner};
use rho_parse::ParseOutput;
use rho_vector::Logic;

use crate::call_stack::{CallEntry, CallStack};
use crate::environment::EnvTracker;
use crate::errors::{
    missing_argument, object_not_found, unknown_package, ControlAction, EvalError, EvalResult,
    InternalError,
};
use crate::print_handler::SharedPrintHandler;
use crate::registry::{PackageRegistry, PackageScope};
use crate::value::{Force, ListItem, Package, Promise};
use crate::{Environment, SharedRegistry, Value};

use eval::Evaluator;

/// Tunables fixed at construction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EvalConfig {
    /// Active calls allowed before a call fails. `None` is unbounded.
    pub max_call_depth: Option<usize>,
}

/// Result of one top-level expression.
#[derive(Clone, Debug, PartialEq)]
pub struct Outcome {
    pub value: Value,
    /// Whether a console would auto-print `value`.
    pub visible: bool,
}

/// Names the evaluator looks up on every call.
#[derive(Clone, Copy, Debug)]
struct Symbols {
    dots: Name,
    seq: Name,
    from: Name,
    to: Name,
    and: Name,
    or: Name,
}

impl Symbols {
    fn new(interner: &SharedInterner) -> Self {
        Symbols {
            dots: interner.intern("..."),
            seq: interner.intern("seq"),
            from: interner.intern("from"),
            to: interner.intern("to"),
            and: interner.intern("&&"),
            or: interner.intern("||"),
        }
    }

    /// The operator a builtin named `name` short-circuits as, if any.
    fn short_circuit(self, name: Name) -> Option<Logic> {
        if name == self.and {
            Some(Logic::And)
        } else if name == self.or {
            Some(Logic::Or)
        } else {
            None
        }
    }
}

pub struct Interpreter {
    interner: SharedInterner,
    registry: SharedRegistry<PackageRegistry>,
    print_handler: SharedPrintHandler,
    base: Environment,
    global: Environment,
    call_stack: CallStack,
    envs: EnvTracker,
    symbols: Symbols,
    config: EvalConfig,
    /// Visibility of the most recent result.
    visible: bool,
}

impl Interpreter {
    /// An interpreter with the bundled packages, printing to stdout.
    pub fn new() -> Self {
        InterpreterBuilder::new().build()
    }

    pub fn builder() -> InterpreterBuilder {
        InterpreterBuilder::new()
    }

    /// Interner that names in parsed programs must come from.
    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    pub fn global(&self) -> &Environment {
        &self.global
    }

    pub fn base(&self) -> &Environment {
        &self.base
    }

    pub fn call_stack(&self) -> &CallStack {
        &self.call_stack
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.print_handler
    }

    pub fn registry(&self) -> &SharedRegistry<PackageRegistry> {
        &self.registry
    }

    pub fn config(&self) -> EvalConfig {
        self.config
    }

    /// Evaluate a parsed program in the global environment, one value per
    /// top-level expression. The program must have been parsed with
    /// [`Interpreter::interner`].
    pub fn eval_program(&mut self, program: &ParseOutput) -> Result<Vec<Value>, InternalError> {
        Ok(self
            .run(program)?
            .into_iter()
            .map(|outcome| outcome.value)
            .collect())
    }

    /// Like [`Interpreter::eval_program`], also reporting visibility.
    pub fn run(&mut self, program: &ParseOutput) -> Result<Vec<Outcome>, InternalError> {
        let arena = SharedArena::new(program.arena.clone());
        let global = self.global.clone();
        program
            .exprs
            .iter()
            .map(|&id| self.eval_top_level(&arena, id, &global))
            .collect()
    }

    /// Parse `source` and evaluate it. Parse errors become error values in
    /// place of the statements they broke.
    pub fn eval_source(&mut self, source: &str) -> Result<Vec<Value>, InternalError> {
        let program = rho_parse::parse(source, &self.interner);
        self.eval_program(&program)
    }

    /// Parse `source` and run it, reporting visibility.
    pub fn run_source(&mut self, source: &str) -> Result<Vec<Outcome>, InternalError> {
        let program = rho_parse::parse(source, &self.interner);
        self.run(&program)
    }

    fn eval_top_level(
        &mut self,
        arena: &SharedArena,
        id: ExprId,
        env: &Environment,
    ) -> Result<Outcome, InternalError> {
        self.visible = true;
        match self.eval_in(arena, id, env) {
            Ok(value) => Ok(Outcome {
                value,
                visible: self.visible,
            }),
            Err(ControlAction::Error(error)) => {
                tracing::debug!(%error, "top-level expression failed");
                Ok(Outcome {
                    value: Value::error(error),
                    visible: true,
                })
            }
            Err(ControlAction::Fatal(error)) => {
                tracing::error!(%error, "evaluation aborted");
                Err(error)
            }
        }
    }

    /// Evaluate `id` from `arena` in `env`.
    pub(crate) fn eval_in(&mut self, arena: &SharedArena, id: ExprId, env: &Environment) -> EvalResult {
        Evaluator::new(self, arena.clone(), env.clone()).eval(id)
    }

    /// Force a promise, memoizing its value. A failed force leaves the
    /// promise unforced.
    pub(crate) fn force_promise(&mut self, promise: &Promise) -> EvalResult {
        match promise.begin()? {
            Force::Ready(value) => Ok(value),
            Force::Run(thunk) => {
                tracing::trace!(expr = ?thunk.expr, "forcing promise");
                let Some(env) = thunk.env.upgrade() else {
                    promise.abandon(thunk);
                    return Err(InternalError::PromiseFrameDropped.into());
                };
                match self.eval_in(&thunk.arena, thunk.expr, &env) {
                    Ok(value) => {
                        promise.resolve(value.clone());
                        Ok(value)
                    }
                    Err(error) => {
                        promise.abandon(thunk);
                        Err(error)
                    }
                }
            }
        }
    }

    /// Value of a variable: the lexical chain first, then loaded packages.
    pub(crate) fn get_variable(&mut self, env: &Environment, name: Name) -> EvalResult {
        let value = env
            .lookup(name)
            .or_else(|| self.global.lookup_in_packages(name))
            .ok_or_else(|| object_not_found(self.interner.lookup(name)))?;
        match value {
            Value::Missing => Err(missing_argument(self.interner.lookup(name)).into()),
            Value::Promise(promise) => self.force_promise(&promise),
            value => Ok(value),
        }
    }

    /// The `...` binding visible from `env`, if any.
    pub(crate) fn dots(&self, env: &Environment) -> Option<Vec<ListItem>> {
        match env.lookup(self.symbols.dots)? {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// `library(name)`: a new package instance attached to the global
    /// environment.
    pub(crate) fn load_package(&mut self, name: &str) -> EvalResult {
        let Some(init) = self.registry.get(name) else {
            return Err(unknown_package(name).into());
        };
        let env = Environment::new_package(&self.global, format!("package:{name}"));
        self.envs.track(&env);
        init(&mut PackageScope::new(self, env.clone()))?;

        let package = Package {
            name: name.to_owned(),
            env,
        };
        self.global.attach_package(package.clone());
        tracing::debug!(
            package = name,
            attached = self.global.packages().len(),
            "loaded package"
        );
        self.visible = false;
        Ok(Value::Package(package))
    }

    /// Push `entry`, returning a guard that pops it when dropped.
    pub(crate) fn enter_call(&mut self, entry: CallEntry) -> Result<CallFrameGuard<'_>, EvalError> {
        self.call_stack.push(entry)?;
        Ok(CallFrameGuard::new(self))
    }

    pub(crate) fn track_env(&mut self, env: &Environment) {
        self.envs.track(env);
    }

    pub(crate) fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Interpreter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Interpreter")
            .field("global", &self.global)
            .field("call_depth", &self.call_stack.depth())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Drop for Interpreter {
    fn drop(&mut self) {
        // Closures capture the environments that bind them; clear every
        // frame so those cycles do not outlive the interpreter.
        for package in self.global.packages() {
            package.env.clear();
        }
        self.envs.clear_all();
        self.global.clear();
        self.base.clear();
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
