//! Run-time values.
//!
//! Every scalar is a length-one [`Vector`]. Vectors, lists, `NULL`, the
//! missing marker, errors and quoted expressions compare by value;
//! closures, builtins, promises, packages and environments compare by
//! identity.

mod display;

pub(crate) use display::describe_actual;

use rho_ir::{ExprId, ExprKind, Name, ParamRange, SharedArena};
use rho_vector::Vector;

use crate::environment::LocalScope;
use crate::errors::{recursive_promise, EvalError, InternalError};
use crate::interpreter::NativeFn;
use crate::resolver::ParamResolver;
use crate::{Environment, SharedRegistry, WeakEnvironment};

/// One element of a list or of a `...` binding.
pub type ListItem = (Option<Name>, Value);

#[derive(Clone, Debug)]
pub enum Value {
    Vector(Vector),
    /// Ordered, optionally named.
    List(Vec<ListItem>),
    Closure(Closure),
    Builtin(Builtin),
    Promise(Promise),
    /// An unsupplied argument without a default. Reading it is an error.
    Missing,
    Null,
    Error(Box<EvalError>),
    Package(Package),
    Env(Environment),
    /// A quoted expression.
    Lang(Lang),
}

impl Value {
    pub fn number(value: f64) -> Self {
        Value::Vector(Vector::scalar(value))
    }

    pub fn numbers(values: Vec<f64>) -> Self {
        Value::Vector(Vector::numeric(values))
    }

    pub fn boolean(value: bool) -> Self {
        Value::Vector(Vector::boolean(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Value::Vector(Vector::string(value))
    }

    pub fn error(error: EvalError) -> Self {
        Value::Error(Box::new(error))
    }

    pub fn as_vector(&self) -> Option<&Vector> {
        match self {
            Value::Vector(v) => Some(v),
            _ => None,
        }
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Value::Closure(_) | Value::Builtin(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error(_))
    }

    /// Storage type, as `typeof()` reports it.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Vector(v) => v.kind().type_name(),
            Value::List(_) => "list",
            Value::Closure(_) => "closure",
            Value::Builtin(_) => "builtin",
            Value::Promise(_) => "promise",
            Value::Missing => "symbol",
            Value::Null => "NULL",
            Value::Error(_) => "error",
            Value::Package(_) => "package",
            Value::Env(_) => "environment",
            Value::Lang(_) => "language",
        }
    }

    /// Length as `length()` reports it.
    pub fn len(&self) -> usize {
        match self {
            Value::Vector(v) => v.len(),
            Value::List(items) => items.len(),
            Value::Null => 0,
            _ => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Vector(a), Value::Vector(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Closure(a), Value::Closure(b)) => a.same(b),
            (Value::Builtin(a), Value::Builtin(b)) => a.same(b),
            (Value::Promise(a), Value::Promise(b)) => a.0.ptr_eq(&b.0),
            (Value::Missing, Value::Missing) | (Value::Null, Value::Null) => true,
            (Value::Error(a), Value::Error(b)) => a == b,
            (Value::Package(a), Value::Package(b)) => a.env.ptr_eq(&b.env),
            (Value::Env(a), Value::Env(b)) => a.ptr_eq(b),
            (Value::Lang(a), Value::Lang(b)) => a.arena.ptr_eq(&b.arena) && a.expr == b.expr,
            _ => false,
        }
    }
}

impl From<Vector> for Value {
    fn from(vector: Vector) -> Self {
        Value::Vector(vector)
    }
}

/// A function definition paired with the environment it was defined in.
#[derive(Clone, Debug)]
pub struct Closure {
    pub arena: SharedArena,
    /// The `Function` node.
    pub def: ExprId,
    pub env: Environment,
}

impl Closure {
    /// Formals and body of the definition.
    pub fn signature(&self) -> Result<(ParamRange, ExprId), InternalError> {
        match self.arena.try_get_expr(self.def).map(|e| e.kind) {
            Some(ExprKind::Function { params, body }) => Ok((params, body)),
            _ => Err(InternalError::NotAFunction { id: self.def }),
        }
    }

    fn same(&self, other: &Closure) -> bool {
        self.arena.ptr_eq(&other.arena) && self.def == other.def && self.env.ptr_eq(&other.env)
    }
}

/// A native function.
#[derive(Clone)]
pub struct Builtin {
    pub name: Name,
    pub func: NativeFn,
    pub resolver: Option<SharedRegistry<ParamResolver>>,
}

impl Builtin {
    fn same(&self, other: &Builtin) -> bool {
        self.name == other.name && self.func as usize == other.func as usize
    }
}

impl std::fmt::Debug for Builtin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Builtin")
            .field("name", &self.name)
            .field("resolver", &self.resolver.is_some())
            .finish_non_exhaustive()
    }
}

/// Expression, environment and arena of an unforced promise.
#[derive(Clone, Debug)]
pub struct Thunk {
    pub arena: SharedArena,
    pub expr: ExprId,
    /// The frame that binds the promise, which owns it.
    pub env: WeakEnvironment,
}

enum PromiseState {
    Pending(Thunk),
    Forcing,
    Forced(Value),
}

/// What forcing a promise has to do next.
pub(crate) enum Force {
    Ready(Value),
    Run(Thunk),
}

/// A lazily evaluated, memoized binding.
#[derive(Clone)]
pub struct Promise(LocalScope<PromiseState>);

impl Promise {
    pub fn new(thunk: Thunk) -> Self {
        Promise(LocalScope::new(PromiseState::Pending(thunk)))
    }

    pub fn is_forced(&self) -> bool {
        matches!(&*self.0.borrow(), PromiseState::Forced(_))
    }

    /// The memoized value, once forced.
    pub fn value(&self) -> Option<Value> {
        match &*self.0.borrow() {
            PromiseState::Forced(value) => Some(value.clone()),
            PromiseState::Pending(_) | PromiseState::Forcing => None,
        }
    }

    /// Start forcing. A promise that is already being forced is a
    /// recursive reference.
    pub(crate) fn begin(&self) -> Result<Force, EvalError> {
        let mut state = self.0.borrow_mut();
        match std::mem::replace(&mut *state, PromiseState::Forcing) {
            PromiseState::Forced(value) => {
                *state = PromiseState::Forced(value.clone());
                Ok(Force::Ready(value))
            }
            PromiseState::Pending(thunk) => Ok(Force::Run(thunk)),
            PromiseState::Forcing => Err(recursive_promise()),
        }
    }

    pub(crate) fn resolve(&self, value: Value) {
        *self.0.borrow_mut() = PromiseState::Forced(value);
    }

    /// Forcing failed: the next read tries again.
    pub(crate) fn abandon(&self, thunk: Thunk) {
        *self.0.borrow_mut() = PromiseState::Pending(thunk);
    }
}

impl std::fmt::Debug for Promise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &*self.0.borrow() {
            PromiseState::Pending(thunk) => write!(f, "Promise(pending {:?})", thunk.expr),
            PromiseState::Forcing => f.write_str("Promise(forcing)"),
            PromiseState::Forced(value) => write!(f, "Promise({value:?})"),
        }
    }
}

/// A loaded package instance.
#[derive(Clone, Debug)]
pub struct Package {
    pub name: String,
    pub env: Environment,
}

/// A quoted expression.
#[derive(Clone, Debug)]
pub struct Lang {
    pub arena: SharedArena,
    pub expr: ExprId,
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
