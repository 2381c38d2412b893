//! Evaluation errors.
//!
//! Two classes travel through evaluation:
//! - [`EvalError`]: language-level. Carries a message and, once known, the
//!   span of the expression that raised it. At top level it becomes an
//!   in-band [`Value::Error`](crate::Value::Error) and the next top-level
//!   expression still runs.
//! - [`InternalError`]: a broken invariant in the evaluator or its input.
//!   Aborts the whole run.
//!
//! [`ControlAction`] carries either one through `?`.

use rho_ir::{ExprId, Span};
use rho_vector::VectorError;

/// Result of evaluating one node.
pub type EvalResult<T = crate::Value> = Result<T, ControlAction>;

/// Typed language-level error category.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("object '{name}' not found")]
    ObjectNotFound { name: String },
    #[error("could not find function \"{name}\"")]
    FunctionNotFound { name: String },
    #[error("attempt to apply non-function")]
    NotCallable,
    #[error("formal argument \"{name}\" matched by multiple actual arguments")]
    DuplicateArgument { name: String },
    #[error("unused {label} ({rendered})")]
    UnusedArguments {
        label: &'static str,
        rendered: String,
    },
    #[error("argument \"{name}\" is missing, with no default")]
    MissingArgument { name: String },
    #[error("invalid '{name}' argument")]
    InvalidArgumentType { name: String },
    #[error("argument '{name}' requires '{requires}'")]
    ArgumentRequires { name: String, requires: String },
    #[error("there is no package called '{name}'")]
    UnknownPackage { name: String },
    #[error("'...' used in an incorrect context")]
    DotsUnbound,
    #[error("call-stack index out of range")]
    CallStackIndex { which: i64 },
    #[error("promise already under evaluation: recursive default argument reference or earlier problems?")]
    RecursivePromise,
    #[error("evaluation nested too deeply: infinite recursion")]
    TooDeep { depth: usize },
    #[error("argument is of length zero")]
    ConditionLengthZero,
    #[error("{0}")]
    Vector(#[from] VectorError),
    #[error("{message}")]
    Stop { message: String },
    #[error("{message}")]
    Syntax { message: String },
    #[error("{message}")]
    Custom { message: String },
}

/// A language-level error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Equals `kind.to_string()`.
    pub message: String,
    pub span: Option<Span>,
}

impl EvalError {
    /// An error with just a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self::from_kind(EvalErrorKind::Custom {
            message: message.into(),
        })
    }

    pub fn from_kind(kind: EvalErrorKind) -> Self {
        let message = kind.to_string();
        EvalError {
            kind,
            message,
            span: None,
        }
    }

    #[must_use]
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    /// Attach `span` unless a more precise one is already present.
    #[must_use]
    pub fn with_span_if_missing(mut self, span: Span) -> Self {
        if self.span.is_none() {
            self.span = Some(span);
        }
        self
    }
}

impl std::fmt::Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for EvalError {}

impl From<VectorError> for EvalError {
    fn from(error: VectorError) -> Self {
        EvalError::from_kind(EvalErrorKind::Vector(error))
    }
}

/// A fault in the evaluator or in the tree it was handed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum InternalError {
    #[error("assignment target {id:?} is not a symbol at {span}")]
    AssignTarget { id: ExprId, span: Span },
    #[error("function value refers to {id:?}, which is not a function definition")]
    NotAFunction { id: ExprId },
    #[error("promise outlived the frame that binds it")]
    PromiseFrameDropped,
    #[error("call stack underflow")]
    CallStackUnderflow,
    #[error("environment chain has no global environment")]
    MissingGlobal,
}

/// What stops evaluation of the current node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlAction {
    Error(EvalError),
    Fatal(InternalError),
}

impl From<EvalError> for ControlAction {
    fn from(error: EvalError) -> Self {
        ControlAction::Error(error)
    }
}

impl From<InternalError> for ControlAction {
    fn from(error: InternalError) -> Self {
        ControlAction::Fatal(error)
    }
}

impl From<VectorError> for ControlAction {
    fn from(error: VectorError) -> Self {
        ControlAction::Error(error.into())
    }
}

impl ControlAction {
    /// Attach `span` to a language-level error that has none yet.
    #[must_use]
    pub fn with_span_if_missing(self, span: Span) -> Self {
        match self {
            ControlAction::Error(e) => ControlAction::Error(e.with_span_if_missing(span)),
            fatal @ ControlAction::Fatal(_) => fatal,
        }
    }
}

// Factories

#[cold]
pub fn object_not_found(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::ObjectNotFound {
        name: name.to_owned(),
    })
}

#[cold]
pub fn function_not_found(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::FunctionNotFound {
        name: name.to_owned(),
    })
}

#[cold]
pub fn not_callable() -> EvalError {
    EvalError::from_kind(EvalErrorKind::NotCallable)
}

#[cold]
pub fn duplicate_argument(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DuplicateArgument {
        name: name.to_owned(),
    })
}

#[cold]
pub fn unused_arguments(rendered: &[String]) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnusedArguments {
        label: if rendered.len() == 1 {
            "argument"
        } else {
            "arguments"
        },
        rendered: rendered.join(", "),
    })
}

#[cold]
pub fn missing_argument(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingArgument {
        name: name.to_owned(),
    })
}

#[cold]
pub fn invalid_argument_type(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::InvalidArgumentType {
        name: name.to_owned(),
    })
}

#[cold]
pub fn unknown_package(name: &str) -> EvalError {
    EvalError::from_kind(EvalErrorKind::UnknownPackage {
        name: name.to_owned(),
    })
}

#[cold]
pub fn dots_unbound() -> EvalError {
    EvalError::from_kind(EvalErrorKind::DotsUnbound)
}

#[cold]
pub fn call_stack_index(which: i64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::CallStackIndex { which })
}

#[cold]
pub fn recursive_promise() -> EvalError {
    EvalError::from_kind(EvalErrorKind::RecursivePromise)
}

#[cold]
pub fn too_deep(depth: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::TooDeep { depth })
}

#[cold]
pub fn stop(message: impl Into<String>) -> EvalError {
    EvalError::from_kind(EvalErrorKind::Stop {
        message: message.into(),
    })
}
