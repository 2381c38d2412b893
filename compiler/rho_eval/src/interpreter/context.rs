//! What a native function sees of the interpreter.

use rho_ir::{Name, StringInterner};

use super::Interpreter;
use crate::call_stack::CallStack;
use crate::errors::{ControlAction, EvalError};
use crate::print_handler::SharedPrintHandler;
use crate::resolver::Args;
use crate::{Environment, Value};

/// Signature of every builtin. Builtins report language errors only.
pub type NativeFn = fn(&mut CallContext<'_>, Args) -> Result<Value, EvalError>;

/// Access handed to a running builtin.
pub struct CallContext<'i> {
    interp: &'i mut Interpreter,
    caller: Environment,
}

impl<'i> CallContext<'i> {
    pub(crate) fn new(interp: &'i mut Interpreter, caller: Environment) -> Self {
        CallContext { interp, caller }
    }

    pub fn interner(&self) -> &StringInterner {
        &self.interp.interner
    }

    /// Intern `s`.
    pub fn sym(&self, s: &str) -> Name {
        self.interp.interner.intern(s)
    }

    /// The resolved argument called `name`.
    pub fn arg<'a>(&self, args: &'a Args, name: &str) -> Option<&'a Value> {
        self.interp.interner.get(name).and_then(|n| args.named(n))
    }

    /// The environment the builtin was called from.
    pub fn caller(&self) -> &Environment {
        &self.caller
    }

    pub fn global(&self) -> &Environment {
        &self.interp.global
    }

    /// The stack as seen by the builtin: its own entry is on top.
    pub fn call_stack(&self) -> &CallStack {
        &self.interp.call_stack
    }

    pub fn print_handler(&self) -> &SharedPrintHandler {
        &self.interp.print_handler
    }

    /// Suppress auto-printing of this call's result.
    pub fn set_invisible(&mut self) {
        self.interp.set_visible(false);
    }

    /// Console rendering of `value`.
    pub fn display(&self, value: &Value) -> String {
        value.display(&self.interp.interner)
    }

    /// Force `value` if it is a promise.
    pub fn force(&mut self, value: Value) -> Result<Value, EvalError> {
        let Value::Promise(promise) = value else {
            return Ok(value);
        };
        self.interp
            .force_promise(&promise)
            .map_err(|action| match action {
                ControlAction::Error(error) => error,
                ControlAction::Fatal(fatal) => {
                    tracing::error!(%fatal, "internal error while forcing from a builtin");
                    EvalError::new(fatal.to_string())
                }
            })
    }

    /// A fresh environment enclosed by `parent`, released with the
    /// interpreter.
    pub fn new_env(&mut self, parent: &Environment) -> Environment {
        let env = parent.extend();
        self.interp.track_env(&env);
        env
    }
}
