//! Active calls, for reflective frame access.
//!
//! The stack always holds a synthetic bottom entry for top-level
//! evaluation whose frame is the global environment. Entries are pushed
//! through [`CallFrameGuard`](crate::interpreter::CallFrameGuard), which pops
//! them again on every exit path.

use crate::environment::WeakEnvironment;
use crate::errors::{call_stack_index, too_deep, EvalError, InternalError};
use crate::value::Lang;
use crate::{Environment, Value};

/// One active call.
#[derive(Clone, Debug)]
pub struct CallEntry {
    /// Caller's environment at call time. Navigational only.
    dynamic: WeakEnvironment,
    /// The callee's own environment. Builtins run in their caller's.
    frame: Environment,
    function: Value,
    call: Option<Lang>,
}

impl CallEntry {
    pub fn new(dynamic: &Environment, frame: Environment, function: Value, call: Option<Lang>) -> Self {
        CallEntry {
            dynamic: dynamic.downgrade(),
            frame,
            function,
            call,
        }
    }

    /// The caller's environment, if it is still alive.
    pub fn parent(&self) -> Option<Environment> {
        self.dynamic.upgrade()
    }

    pub fn frame(&self) -> &Environment {
        &self.frame
    }

    pub fn function(&self) -> &Value {
        &self.function
    }

    pub fn call(&self) -> Option<&Lang> {
        self.call.as_ref()
    }
}

#[derive(Debug)]
pub struct CallStack {
    entries: Vec<CallEntry>,
    max_depth: Option<usize>,
}

impl CallStack {
    pub fn new(global: &Environment, max_depth: Option<usize>) -> Self {
        let bottom = CallEntry::new(global, global.clone(), Value::Null, None);
        CallStack {
            entries: vec![bottom],
            max_depth,
        }
    }

    /// Push an entry. Fails without pushing when the depth limit is reached.
    pub fn push(&mut self, entry: CallEntry) -> Result<(), EvalError> {
        if let Some(max) = self.max_depth {
            if self.depth() >= max {
                return Err(too_deep(max));
            }
        }
        self.entries.push(entry);
        Ok(())
    }

    /// Pop the top entry. The bottom entry never pops.
    pub fn pop(&mut self) -> Result<CallEntry, InternalError> {
        if self.entries.len() <= 1 {
            return Err(InternalError::CallStackUnderflow);
        }
        self.entries.pop().ok_or(InternalError::CallStackUnderflow)
    }

    /// Active calls, not counting the bottom entry.
    pub fn depth(&self) -> usize {
        self.entries.len() - 1
    }

    pub fn top(&self) -> &CallEntry {
        // `entries` is never empty.
        &self.entries[self.entries.len() - 1]
    }

    /// `which >= 0` counts from the bottom (0 is the top-level frame);
    /// `which < 0` counts back from one below the top (-1 is the caller of
    /// the running call).
    pub fn get_entry(&self, which: i64) -> Result<&CallEntry, EvalError> {
        let top = self.entries.len() as i64 - 1;
        let index = if which >= 0 { Some(which) } else { top.checked_add(which) };
        let Some(index) = index.filter(|i| (0..=top).contains(i)) else {
            return Err(call_stack_index(which));
        };
        Ok(&self.entries[index as usize])
    }
}
