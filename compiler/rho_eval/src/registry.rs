//! Package registration and loading.
//!
//! A [`PackageRegistry`] maps package names to initializers. It is built
//! once, frozen into a [`SharedRegistry`](crate::SharedRegistry) and handed
//! to interpreters. Each `library(name)` runs the initializer again against
//! a fresh package environment through a [`PackageScope`].

use std::fmt;

use rustc_hash::FxHashMap;

use rho_ir::{SharedArena, StringInterner};

use crate::errors::{EvalError, EvalErrorKind, EvalResult};
use crate::interpreter::{Interpreter, NativeFn};
use crate::resolver::ParamResolver;
use crate::value::Builtin;
use crate::{Environment, SharedRegistry, Value};

/// Populates a freshly created package environment.
pub type PackageInit = fn(&mut PackageScope<'_>) -> EvalResult<()>;

#[derive(Clone, Default)]
pub struct PackageRegistry {
    packages: FxHashMap<String, PackageInit>,
}

impl PackageRegistry {
    /// A registry with no packages.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the packages that ship with the interpreter.
    pub fn with_bundled() -> Self {
        let mut registry = Self::new();
        crate::packages::register_bundled(&mut registry);
        registry
    }

    /// Register `init` under `name`. A later registration replaces an
    /// earlier one.
    pub fn register(&mut self, name: &str, init: PackageInit) {
        self.packages.insert(name.to_owned(), init);
    }

    pub fn get(&self, name: &str) -> Option<PackageInit> {
        self.packages.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.packages.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for PackageRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackageRegistry")
            .field("packages", &self.names())
            .finish()
    }
}

/// What an initializer may do to the environment it populates.
pub struct PackageScope<'i> {
    interp: &'i mut Interpreter,
    env: Environment,
}

impl<'i> PackageScope<'i> {
    pub(crate) fn new(interp: &'i mut Interpreter, env: Environment) -> Self {
        PackageScope { interp, env }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn interner(&self) -> &StringInterner {
        self.interp.interner()
    }

    /// Evaluate `source` with the package environment as its global scope.
    /// Returns the value of the last expression.
    pub fn eval_source(&mut self, source: &str) -> EvalResult {
        let program = rho_parse::parse(source, self.interp.interner());
        if let Some(error) = program.errors.first() {
            return Err(EvalError::from_kind(EvalErrorKind::Syntax {
                message: error.to_string(),
            })
            .with_span(error.span())
            .into());
        }
        let arena = SharedArena::new(program.arena);
        let mut last = Value::Null;
        for &id in &program.exprs {
            last = self.interp.eval_in(&arena, id, &self.env)?;
        }
        Ok(last)
    }

    /// Bind a native function, optionally with declared parameters.
    pub fn add_builtin(&mut self, name: &str, func: NativeFn, resolver: Option<ParamResolver>) {
        let name = self.interp.interner().intern(name);
        let builtin = Builtin {
            name,
            func,
            resolver: resolver.map(SharedRegistry::new),
        };
        self.env.store(name, Value::Builtin(builtin));
    }

    /// Bind a ready-made value.
    pub fn store(&mut self, name: &str, value: Value) {
        let name = self.interp.interner().intern(name);
        self.env.store(name, value);
    }
}
