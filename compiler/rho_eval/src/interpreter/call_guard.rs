//! RAII guard for call-stack entries.
//!
//! Every push onto the call stack happens through
//! [`Interpreter::enter_call`], and the returned guard pops the entry on
//! drop. Normal returns, `?` propagation and unwinding all leave the stack
//! as it was before the call.

use std::ops::{Deref, DerefMut};

use super::Interpreter;

/// Pops one call-stack entry when dropped.
///
/// Derefs to the interpreter so the callee can be evaluated through the
/// guard.
pub struct CallFrameGuard<'i> {
    interpreter: &'i mut Interpreter,
}

impl<'i> CallFrameGuard<'i> {
    pub(super) fn new(interpreter: &'i mut Interpreter) -> Self {
        CallFrameGuard { interpreter }
    }
}

impl Deref for CallFrameGuard<'_> {
    type Target = Interpreter;

    fn deref(&self) -> &Self::Target {
        self.interpreter
    }
}

impl DerefMut for CallFrameGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.interpreter
    }
}

impl Drop for CallFrameGuard<'_> {
    fn drop(&mut self) {
        if let Err(error) = self.interpreter.call_stack.pop() {
            tracing::error!(%error, "call stack popped past its bottom entry");
        }
    }
}
