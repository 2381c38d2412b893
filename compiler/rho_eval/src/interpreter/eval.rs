//! Expression evaluation.

use rho_ir::{
    ArgRange, ExprArena, ExprId, ExprKind, ExprRange, ExprVisitor, Name, ParamRange, SharedArena,
    Span,
};
use rho_stack::ensure_sufficient_stack;

use super::Interpreter;
use crate::errors::{
    dots_unbound, ControlAction, EvalError, EvalErrorKind, EvalResult, InternalError,
};
use crate::value::{Closure, Lang};
use crate::{Environment, Value};

/// Walks expressions of one arena in one environment.
pub(crate) struct Evaluator<'i> {
    pub(super) interp: &'i mut Interpreter,
    pub(super) arena: SharedArena,
    pub(super) env: Environment,
}

impl<'i> Evaluator<'i> {
    pub(crate) fn new(interp: &'i mut Interpreter, arena: SharedArena, env: Environment) -> Self {
        Evaluator { interp, arena, env }
    }

    /// Evaluate `id`, growing the native stack for deep nesting.
    pub(crate) fn eval(&mut self, id: ExprId) -> EvalResult {
        let _span = tracing::trace_span!("eval", ?id).entered();
        ensure_sufficient_stack(|| self.visit_expr(id))
    }

    pub(super) fn lang(&self, expr: ExprId) -> Lang {
        Lang {
            arena: self.arena.clone(),
            expr,
        }
    }

    /// Symbol named by a canonical assignment target.
    fn target_name(&self, target: ExprId, span: Span) -> Result<Name, InternalError> {
        match self.arena.get_expr(target).kind {
            ExprKind::Ident(name) | ExprKind::Str(name) => Ok(name),
            _ => Err(InternalError::AssignTarget { id: target, span }),
        }
    }

    fn truthy(&self, condition: &Value, span: Span) -> Result<bool, EvalError> {
        let not_logical = || EvalError::new("argument is not interpretable as logical").with_span(span);
        match condition {
            Value::Vector(v) if v.is_empty() => {
                Err(EvalError::from_kind(EvalErrorKind::ConditionLengthZero).with_span(span))
            }
            Value::Vector(v) => match v.as_bools() {
                Ok(values) => Ok(values[0]),
                Err(_) => Err(not_logical()),
            },
            Value::Null => {
                Err(EvalError::from_kind(EvalErrorKind::ConditionLengthZero).with_span(span))
            }
            _ => Err(not_logical()),
        }
    }
}

impl ExprVisitor for Evaluator<'_> {
    type Output = EvalResult;

    fn arena(&self) -> &ExprArena {
        &self.arena
    }

    fn visit_number(&mut self, value: f64, _span: Span) -> EvalResult {
        self.interp.visible = true;
        Ok(Value::number(value))
    }

    fn visit_str(&mut self, value: Name, _span: Span) -> EvalResult {
        self.interp.visible = true;
        Ok(Value::string(self.interp.interner.lookup(value)))
    }

    fn visit_bool(&mut self, value: bool, _span: Span) -> EvalResult {
        self.interp.visible = true;
        Ok(Value::boolean(value))
    }

    fn visit_null(&mut self, _span: Span) -> EvalResult {
        self.interp.visible = true;
        Ok(Value::Null)
    }

    fn visit_missing(&mut self, _span: Span) -> EvalResult {
        Ok(Value::Missing)
    }

    fn visit_ident(&mut self, name: Name, span: Span) -> EvalResult {
        let value = self
            .interp
            .get_variable(&self.env, name)
            .map_err(|e| e.with_span_if_missing(span))?;
        self.interp.visible = true;
        Ok(value)
    }

    fn visit_dots(&mut self, span: Span) -> EvalResult {
        Err(dots_unbound().with_span(span).into())
    }

    fn visit_assign(&mut self, target: ExprId, value: ExprId, span: Span) -> EvalResult {
        let name = self.target_name(target, span)?;
        let value = self.eval(value)?;
        self.env.store(name, value.clone());
        self.interp.visible = false;
        Ok(value)
    }

    fn visit_assign_inherited(&mut self, target: ExprId, value: ExprId, span: Span) -> EvalResult {
        let name = self.target_name(target, span)?;
        let value = self.eval(value)?;
        let Some(env) = self.env.target_for_assignment(name, true) else {
            return Err(InternalError::MissingGlobal.into());
        };
        tracing::debug!(
            name = self.interp.interner.lookup(name),
            global = env.is_global(),
            "superassignment"
        );
        env.store(name, value.clone());
        self.interp.visible = false;
        Ok(value)
    }

    fn visit_function(&mut self, id: ExprId, _params: ParamRange, _body: ExprId, _span: Span) -> EvalResult {
        self.interp.visible = true;
        Ok(Value::Closure(Closure {
            arena: self.arena.clone(),
            def: id,
            env: self.env.clone(),
        }))
    }

    fn visit_call(&mut self, id: ExprId, func: ExprId, args: ArgRange, span: Span) -> EvalResult {
        self.call(id, func, args, span)
    }

    fn visit_block(&mut self, exprs: ExprRange, _span: Span) -> EvalResult {
        let arena = self.arena.clone();
        let mut last = Value::Null;
        for &id in arena.get_expr_list(exprs) {
            last = self.eval(id)?;
        }
        Ok(last)
    }

    fn visit_range(&mut self, from: ExprId, to: ExprId, span: Span) -> EvalResult {
        let from = self.eval(from)?;
        let to = self.eval(to)?;
        let symbols = self.interp.symbols;
        let seq = self
            .interp
            .find_function(&self.env, symbols.seq)
            .map_err(|e| e.with_span_if_missing(span))?;
        let actuals = vec![(Some(symbols.from), from), (Some(symbols.to), to)];
        self.interp.apply(&seq, actuals, &self.env, None, span)
    }

    fn visit_library(&mut self, name: Name, span: Span) -> EvalResult {
        let name = self.interp.interner.lookup(name);
        self.interp
            .load_package(name)
            .map_err(|e| e.with_span_if_missing(span))
    }

    fn visit_paren(&mut self, inner: ExprId, _span: Span) -> EvalResult {
        let value = self.eval(inner)?;
        self.interp.visible = true;
        Ok(value)
    }

    fn visit_if(&mut self, cond: ExprId, then: ExprId, else_: Option<ExprId>, span: Span) -> EvalResult {
        let condition = self.eval(cond)?;
        if self.truthy(&condition, span)? {
            self.eval(then)
        } else if let Some(else_) = else_ {
            self.eval(else_)
        } else {
            self.interp.visible = false;
            Ok(Value::Null)
        }
    }

    fn visit_quote(&mut self, inner: ExprId, _span: Span) -> EvalResult {
        self.interp.visible = true;
        Ok(Value::Lang(self.lang(inner)))
    }

    fn visit_error(&mut self, message: Name, span: Span) -> EvalResult {
        let message = self.interp.interner.lookup(message).to_owned();
        Err(ControlAction::Error(
            EvalError::from_kind(EvalErrorKind::Syntax { message }).with_span(span),
        ))
    }
}
