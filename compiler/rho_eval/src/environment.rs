//! Lexical environments.
//!
//! An [`Environment`] is a binding table plus a link to its enclosure.
//! Every holder (closures, promises, call-stack entries, packages) shares
//! the same frame, so a `store` is visible to all of them at once.
//!
//! Per interpreter the chain is `empty <- base <- global`. Function calls
//! and `new.env()` extend whatever environment they start from; package
//! environments extend the global one.

#![expect(
    clippy::disallowed_types,
    reason = "Rc is the implementation of LocalScope<T>"
)]

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use rustc_hash::FxHashMap;

use rho_ir::Name;

use crate::value::{Package, Value};

/// Single-threaded shared mutable cell.
///
/// All `Rc<RefCell<_>>` allocation in the evaluator goes through here.
#[repr(transparent)]
pub(crate) struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub(crate) fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }

    #[inline]
    pub(crate) fn borrow(&self) -> std::cell::Ref<'_, T> {
        self.0.borrow()
    }

    #[inline]
    pub(crate) fn borrow_mut(&self) -> std::cell::RefMut<'_, T> {
        self.0.borrow_mut()
    }

    pub(crate) fn downgrade(&self) -> WeakScope<T> {
        WeakScope(Rc::downgrade(&self.0))
    }

    pub(crate) fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

/// Non-owning counterpart of [`LocalScope`].
pub(crate) struct WeakScope<T>(Weak<RefCell<T>>);

impl<T> WeakScope<T> {
    pub(crate) fn upgrade(&self) -> Option<LocalScope<T>> {
        self.0.upgrade().map(LocalScope)
    }
}

impl<T> Clone for WeakScope<T> {
    fn clone(&self) -> Self {
        WeakScope(Weak::clone(&self.0))
    }
}

struct Frame {
    bindings: FxHashMap<Name, Value>,
    /// `None` only for the empty environment.
    enclosure: Option<Environment>,
    is_global: bool,
    /// `<<-` search ends here: the global and package environments.
    assignment_root: bool,
    name: Option<String>,
    /// Loaded packages in load order. Only the global frame has any.
    packages: Vec<Package>,
}

impl Frame {
    fn new(enclosure: Option<Environment>, name: Option<String>) -> Self {
        Frame {
            bindings: FxHashMap::default(),
            enclosure,
            is_global: false,
            assignment_root: false,
            name,
            packages: Vec::new(),
        }
    }
}

/// A shared, mutable scope.
#[derive(Clone)]
pub struct Environment(LocalScope<Frame>);

impl Environment {
    /// The root of every chain. Holds nothing.
    pub fn empty() -> Self {
        Environment(LocalScope::new(Frame::new(None, Some("R_EmptyEnv".into()))))
    }

    /// The global environment. Terminates `<<-` search.
    pub fn new_global(enclosure: &Environment) -> Self {
        let mut frame = Frame::new(Some(enclosure.clone()), Some("R_GlobalEnv".into()));
        frame.is_global = true;
        frame.assignment_root = true;
        Environment(LocalScope::new(frame))
    }

    /// A package environment: enclosed by the global one, but `<<-` from
    /// package code stops here instead of reaching it.
    pub fn new_package(global: &Environment, name: impl Into<String>) -> Self {
        let mut frame = Frame::new(Some(global.clone()), Some(name.into()));
        frame.assignment_root = true;
        Environment(LocalScope::new(frame))
    }

    /// A fresh environment enclosed by this one.
    pub fn extend(&self) -> Self {
        Environment(LocalScope::new(Frame::new(Some(self.clone()), None)))
    }

    pub fn extend_named(&self, name: impl Into<String>) -> Self {
        Environment(LocalScope::new(Frame::new(Some(self.clone()), Some(name.into()))))
    }

    /// A fresh enclosed environment pre-populated with `bindings`.
    pub fn extend_with(&self, bindings: impl IntoIterator<Item = (Name, Value)>) -> Self {
        let env = self.extend();
        env.0.borrow_mut().bindings.extend(bindings);
        env
    }

    /// Search this frame, then the enclosure chain.
    pub fn lookup(&self, name: Name) -> Option<Value> {
        let mut current = self.clone();
        loop {
            if let Some(value) = current.lookup_local(name) {
                return Some(value);
            }
            current = current.enclosure()?;
        }
    }

    /// Search this frame only.
    pub fn lookup_local(&self, name: Name) -> Option<Value> {
        self.0.borrow().bindings.get(&name).cloned()
    }

    pub fn contains_local(&self, name: Name) -> bool {
        self.0.borrow().bindings.contains_key(&name)
    }

    /// Bind `name` in this frame, shadowing any outer binding.
    pub fn store(&self, name: Name, value: Value) {
        self.0.borrow_mut().bindings.insert(name, value);
    }

    /// Names bound in this frame, in interning order.
    pub fn symbols(&self) -> Vec<Name> {
        let mut names: Vec<Name> = self.0.borrow().bindings.keys().copied().collect();
        names.sort_by_key(|n| n.index());
        names
    }

    pub fn enclosure(&self) -> Option<Environment> {
        self.0.borrow().enclosure.clone()
    }

    pub fn is_global(&self) -> bool {
        self.0.borrow().is_global
    }

    pub fn is_assignment_root(&self) -> bool {
        self.0.borrow().assignment_root
    }

    pub fn name(&self) -> Option<String> {
        self.0.borrow().name.clone()
    }

    /// Follow enclosures to the global environment.
    pub fn get_global(&self) -> Option<Environment> {
        let mut current = self.clone();
        loop {
            if current.is_global() {
                return Some(current);
            }
            current = current.enclosure()?;
        }
    }

    /// This environment or the nearest enclosure called `name`.
    pub fn get_named_ancestor(&self, name: &str) -> Option<Environment> {
        let mut current = self.clone();
        loop {
            if current.0.borrow().name.as_deref() == Some(name) {
                return Some(current);
            }
            current = current.enclosure()?;
        }
    }

    /// Where an assignment to `name` lands.
    ///
    /// Plain assignment, and any assignment made in the global or a package
    /// environment, writes here. `<<-` starts at the enclosure and stops at
    /// the first frame that already binds `name`, or at the global or
    /// package environment. `None` when the chain has neither.
    pub fn target_for_assignment(&self, name: Name, inherited: bool) -> Option<Environment> {
        if !inherited || self.is_assignment_root() {
            return Some(self.clone());
        }
        let mut current = self.enclosure()?;
        loop {
            if current.is_assignment_root() || current.contains_local(name) {
                return Some(current);
            }
            current = current.enclosure()?;
        }
    }

    /// Record a loaded package. Only meaningful on the global environment.
    pub fn attach_package(&self, package: Package) {
        self.0.borrow_mut().packages.push(package);
    }

    /// Loaded packages, most recently loaded first.
    pub fn packages(&self) -> Vec<Package> {
        self.0.borrow().packages.iter().rev().cloned().collect()
    }

    /// Search the loaded packages of this (global) environment.
    pub fn lookup_in_packages(&self, name: Name) -> Option<Value> {
        self.packages()
            .iter()
            .find_map(|package| package.env.lookup_local(name))
    }

    pub fn ptr_eq(&self, other: &Environment) -> bool {
        self.0.ptr_eq(&other.0)
    }

    pub fn downgrade(&self) -> WeakEnvironment {
        WeakEnvironment(self.0.downgrade())
    }

    /// Drop every binding and package record, breaking reference cycles
    /// through this frame.
    pub(crate) fn clear(&self) {
        // Move out first: dropping values can re-enter this frame.
        let (bindings, packages) = {
            let mut frame = self.0.borrow_mut();
            (
                std::mem::take(&mut frame.bindings),
                std::mem::take(&mut frame.packages),
            )
        };
        drop(bindings);
        drop(packages);
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let frame = self.0.borrow();
        match &frame.name {
            Some(name) => write!(f, "<environment: {name}>"),
            None => write!(f, "<environment: {} bindings>", frame.bindings.len()),
        }
    }
}

/// A navigational link to an environment that does not keep it alive.
#[derive(Clone)]
pub struct WeakEnvironment(WeakScope<Frame>);

impl WeakEnvironment {
    pub fn upgrade(&self) -> Option<Environment> {
        self.0.upgrade().map(Environment)
    }
}

impl fmt::Debug for WeakEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upgrade() {
            Some(env) => write!(f, "Weak({env:?})"),
            None => f.write_str("Weak(<dropped>)"),
        }
    }
}

/// Weak registry of every environment an interpreter created, so the
/// interpreter can clear them all when it is dropped.
#[derive(Default)]
pub(crate) struct EnvTracker {
    envs: Vec<WeakEnvironment>,
    prune_at: usize,
}

impl EnvTracker {
    const MIN_PRUNE: usize = 64;

    pub(crate) fn track(&mut self, env: &Environment) {
        self.envs.push(env.downgrade());
        if self.envs.len() >= self.prune_at.max(Self::MIN_PRUNE) {
            self.envs.retain(|weak| weak.upgrade().is_some());
            self.prune_at = self.envs.len() * 2;
        }
    }

    /// Clear every environment still alive.
    pub(crate) fn clear_all(&mut self) {
        for weak in std::mem::take(&mut self.envs) {
            if let Some(env) = weak.upgrade() {
                env.clear();
            }
        }
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "tests use unwrap for brevity")]
mod tests;
