//! Interpreter construction.

use rho_ir::SharedInterner;

use super::{EvalConfig, Interpreter, Symbols};
use crate::call_stack::CallStack;
use crate::environment::EnvTracker;
use crate::print_handler::{stdout_handler, SharedPrintHandler};
use crate::registry::{PackageRegistry, PackageScope};
use crate::{builtins, Environment, SharedRegistry};

/// Builder for [`Interpreter`]. Unset parts get defaults: a fresh
/// interner, the bundled packages, stdout output and no depth limit.
#[derive(Default)]
pub struct InterpreterBuilder {
    interner: Option<SharedInterner>,
    registry: Option<SharedRegistry<PackageRegistry>>,
    print_handler: Option<SharedPrintHandler>,
    max_call_depth: Option<usize>,
}

impl InterpreterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Share an interner, e.g. with a parser that runs ahead.
    #[must_use]
    pub fn interner(mut self, interner: SharedInterner) -> Self {
        self.interner = Some(interner);
        self
    }

    #[must_use]
    pub fn registry(mut self, registry: SharedRegistry<PackageRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    #[must_use]
    pub fn print_handler(mut self, handler: SharedPrintHandler) -> Self {
        self.print_handler = Some(handler);
        self
    }

    #[must_use]
    pub fn max_call_depth(mut self, depth: usize) -> Self {
        self.max_call_depth = Some(depth);
        self
    }

    pub fn build(self) -> Interpreter {
        let interner = self.interner.unwrap_or_default();
        let base = Environment::empty().extend_named("base");
        let global = Environment::new_global(&base);
        let config = EvalConfig {
            max_call_depth: self.max_call_depth,
        };

        let mut interp = Interpreter {
            symbols: Symbols::new(&interner),
            interner,
            registry: self
                .registry
                .unwrap_or_else(|| SharedRegistry::new(PackageRegistry::with_bundled())),
            print_handler: self.print_handler.unwrap_or_else(stdout_handler),
            call_stack: CallStack::new(&global, config.max_call_depth),
            base: base.clone(),
            global,
            envs: EnvTracker::default(),
            config,
            visible: true,
        };
        builtins::register(&mut PackageScope::new(&mut interp, base));
        tracing::debug!(?config, "interpreter ready");
        interp
    }
}
