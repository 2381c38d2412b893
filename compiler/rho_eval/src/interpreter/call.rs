//! Function calls: callee lookup, actual evaluation and argument binding.

use smallvec::SmallVec;

use rho_ir::{Arg, ArgRange, ExprId, ExprKind, Name, Param, ParamRange, Span};
use rho_vector::Logic;

use super::eval::Evaluator;
use super::{CallContext, Interpreter};
use crate::builtins::condition_scalar;
use crate::call_stack::CallEntry;
use crate::errors::{
    dots_unbound, duplicate_argument, function_not_found, not_callable, unused_arguments,
    EvalError, EvalResult,
};
use crate::resolver::Args;
use crate::value::{describe_actual, Builtin, Closure, Lang, ListItem, Promise, Thunk};
use crate::{Environment, Value};

impl Evaluator<'_> {
    /// Evaluate a call node.
    pub(super) fn call(&mut self, id: ExprId, func: ExprId, args: ArgRange, span: Span) -> EvalResult {
        let arena = self.arena.clone();
        let args: SmallVec<[Arg; 4]> = arena.get_args(args).iter().copied().collect();
        self.check_duplicate_names(&args)?;

        let callee = self.callee(func, span)?;
        if let (Value::Builtin(builtin), [x, y]) = (&callee, args.as_slice()) {
            let plain = |arg: &Arg| !matches!(arena.get_expr(arg.value).kind, ExprKind::Dots);
            if let Some(op) = self.interp.symbols.short_circuit(builtin.name) {
                if plain(x) && plain(y) {
                    return self.short_circuit(op, x.value, y.value, span);
                }
            }
        }
        let actuals = self.eval_actuals(&args)?;
        let call = self.lang(id);
        self.interp.apply(&callee, actuals, &self.env, Some(call), span)
    }

    /// `x && y`, `x || y`: `y` runs only when `x` does not decide.
    fn short_circuit(&mut self, op: Logic, x: ExprId, y: ExprId, span: Span) -> EvalResult {
        let left = self.eval(x)?;
        let left = condition_scalar(op, &left, "x").map_err(|e| e.with_span(span))?;
        let result = if left == matches!(op, Logic::Or) {
            left
        } else {
            let right = self.eval(y)?;
            condition_scalar(op, &right, "y").map_err(|e| e.with_span(span))?
        };
        self.interp.visible = true;
        Ok(Value::boolean(result))
    }

    /// Two actuals with the same name fail the call before anything is
    /// evaluated.
    fn check_duplicate_names(&self, args: &[Arg]) -> Result<(), EvalError> {
        for (i, arg) in args.iter().enumerate() {
            let Some(name) = arg.name else { continue };
            if args[..i].iter().any(|earlier| earlier.name == Some(name)) {
                return Err(duplicate_argument(self.interp.interner.lookup(name)).with_span(arg.span));
            }
        }
        Ok(())
    }

    /// A symbol or string callee names a function; anything else is
    /// evaluated and must produce one.
    fn callee(&mut self, func: ExprId, span: Span) -> EvalResult {
        let kind = self.arena.get_expr(func).kind;
        match kind {
            ExprKind::Ident(name) | ExprKind::Str(name) => self
                .interp
                .find_function(&self.env, name)
                .map_err(|e| e.with_span_if_missing(span)),
            _ => {
                let value = self.eval(func)?;
                if value.is_function() {
                    Ok(value)
                } else {
                    Err(not_callable().with_span(span).into())
                }
            }
        }
    }

    /// Evaluate actuals left to right. `...` splices the caller's dots.
    fn eval_actuals(&mut self, args: &[Arg]) -> EvalResult<Vec<ListItem>> {
        let mut actuals = Vec::with_capacity(args.len());
        for arg in args {
            if matches!(self.arena.get_expr(arg.value).kind, ExprKind::Dots) {
                let dots = self
                    .interp
                    .dots(&self.env)
                    .ok_or_else(|| dots_unbound().with_span(arg.span))?;
                actuals.extend(dots);
                continue;
            }
            let value = self.eval(arg.value)?;
            actuals.push((arg.name, value));
        }
        Ok(actuals)
    }
}

impl Interpreter {
    /// Find a function named `name`: the lexical chain first, then loaded
    /// packages. Bindings that are not functions are skipped.
    pub(crate) fn find_function(&mut self, env: &Environment, name: Name) -> EvalResult {
        let mut shadowed = false;
        let mut current = Some(env.clone());
        while let Some(frame) = current {
            if let Some(value) = frame.lookup_local(name) {
                match self.as_function(value)? {
                    Some(function) => return Ok(function),
                    None => shadowed = true,
                }
            }
            current = frame.enclosure();
        }
        for package in self.global.packages() {
            if let Some(value) = package.env.lookup_local(name) {
                match self.as_function(value)? {
                    Some(function) => return Ok(function),
                    None => shadowed = true,
                }
            }
        }
        if shadowed {
            Err(not_callable().into())
        } else {
            Err(function_not_found(self.interner.lookup(name)).into())
        }
    }

    fn as_function(&mut self, value: Value) -> EvalResult<Option<Value>> {
        let value = match value {
            Value::Promise(promise) => self.force_promise(&promise)?,
            Value::Missing => return Ok(None),
            value => value,
        };
        Ok(value.is_function().then_some(value))
    }

    /// Apply an already evaluated function to already evaluated actuals.
    pub(crate) fn apply(
        &mut self,
        callee: &Value,
        actuals: Vec<ListItem>,
        caller: &Environment,
        call: Option<Lang>,
        span: Span,
    ) -> EvalResult {
        match callee {
            Value::Closure(closure) => self.apply_closure(closure, actuals, caller, call, span),
            Value::Builtin(builtin) => self.apply_builtin(builtin, actuals, caller, call, span),
            _ => Err(not_callable().with_span(span).into()),
        }
    }

    #[tracing::instrument(level = "debug", skip_all, fields(depth = self.call_stack.depth()))]
    fn apply_closure(
        &mut self,
        closure: &Closure,
        actuals: Vec<ListItem>,
        caller: &Environment,
        call: Option<Lang>,
        span: Span,
    ) -> EvalResult {
        let (params, body) = closure.signature()?;
        let frame = closure.env.extend();
        self.envs.track(&frame);
        self.bind_arguments(closure, params, actuals, &frame)
            .map_err(|e| e.with_span_if_missing(span))?;

        let entry = CallEntry::new(caller, frame.clone(), Value::Closure(closure.clone()), call);
        let mut guard = self.enter_call(entry).map_err(|e| e.with_span(span))?;
        guard.eval_in(&closure.arena, body, &frame)
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(builtin = self.interner.lookup(builtin.name))
    )]
    fn apply_builtin(
        &mut self,
        builtin: &Builtin,
        actuals: Vec<ListItem>,
        caller: &Environment,
        call: Option<Lang>,
        span: Span,
    ) -> EvalResult {
        let mut args = Args::new(actuals);
        if let Some(resolver) = &builtin.resolver {
            args = resolver
                .resolve(args, &self.interner)
                .map_err(|e| e.with_span(span))?;
        }

        let entry = CallEntry::new(caller, caller.clone(), Value::Builtin(builtin.clone()), call);
        let mut guard = self.enter_call(entry).map_err(|e| e.with_span(span))?;
        guard.visible = true;
        let mut ctx = CallContext::new(&mut guard, caller.clone());
        (builtin.func)(&mut ctx, args).map_err(|e| e.with_span_if_missing(span).into())
    }

    /// Bind actuals to formals in `frame`.
    ///
    /// Exact names match first. Remaining unnamed actuals then fill the
    /// remaining formals in order, until a `...` formal absorbs everything
    /// left. Formals still unfilled get a default promise evaluated in
    /// `frame`, or the missing marker.
    fn bind_arguments(
        &self,
        closure: &Closure,
        params: ParamRange,
        actuals: Vec<ListItem>,
        frame: &Environment,
    ) -> Result<(), EvalError> {
        let dots = self.symbols.dots;
        let params: SmallVec<[Param; 4]> = closure.arena.get_params(params).iter().copied().collect();
        let mut formals: SmallVec<[Option<Param>; 4]> = params.iter().copied().map(Some).collect();
        let mut actuals: Vec<Option<ListItem>> = actuals.into_iter().map(Some).collect();

        for slot in &mut actuals {
            let Some((Some(name), _)) = slot else { continue };
            let name = *name;
            if name == dots {
                continue;
            }
            let Some(formal) = formals
                .iter_mut()
                .find(|formal| formal.is_some_and(|p| p.name == name))
            else {
                continue;
            };
            *formal = None;
            if let Some((_, value)) = slot.take() {
                frame.store(name, value);
            }
        }

        let mut next = 0;
        let mut absorbed = false;
        for formal in formals.iter().flatten() {
            if formal.name == dots && !absorbed {
                let rest: Vec<ListItem> = actuals.iter_mut().filter_map(Option::take).collect();
                frame.store(dots, Value::List(rest));
                absorbed = true;
                continue;
            }
            if !absorbed {
                while next < actuals.len() && !matches!(actuals[next], Some((None, _))) {
                    next += 1;
                }
                if let Some((_, value)) = actuals.get_mut(next).and_then(Option::take) {
                    next += 1;
                    // An empty actual behaves as if the argument were not given.
                    if !(matches!(value, Value::Missing) && formal.default.is_some()) {
                        frame.store(formal.name, value);
                        continue;
                    }
                }
            }
            let fallback = match formal.default {
                Some(expr) => Value::Promise(Promise::new(Thunk {
                    arena: closure.arena.clone(),
                    expr,
                    env: frame.downgrade(),
                })),
                None => Value::Missing,
            };
            frame.store(formal.name, fallback);
        }

        let unused: Vec<String> = actuals
            .iter()
            .flatten()
            .map(|item| describe_actual(item, &self.interner))
            .collect();
        if unused.is_empty() {
            Ok(())
        } else {
            Err(unused_arguments(&unused))
        }
    }
}
