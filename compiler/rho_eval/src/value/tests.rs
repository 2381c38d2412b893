use pretty_assertions::assert_eq;

use rho_ir::{SharedArena, SharedInterner};

use super::*;
use crate::errors::EvalErrorKind;

fn closure(source: &str, interner: &SharedInterner, env: &Environment) -> Closure {
    let program = rho_parse::parse(source, interner);
    assert!(program.errors.is_empty(), "{:?}", program.errors);
    Closure {
        def: program.exprs[0],
        arena: SharedArena::new(program.arena),
        env: env.clone(),
    }
}

fn thunk(env: &Environment) -> Thunk {
    let interner = SharedInterner::default();
    let program = rho_parse::parse("1 + 1", &interner);
    Thunk {
        expr: program.exprs[0],
        arena: SharedArena::new(program.arena),
        env: env.downgrade(),
    }
}

#[test]
fn vectors_compare_by_value() {
    assert_eq!(Value::number(1.0), Value::numbers(vec![1.0]));
    assert_ne!(Value::number(1.0), Value::string("1"));
    assert_eq!(Value::Null, Value::Null);
    assert_ne!(Value::Null, Value::Missing);
}

#[test]
fn closures_compare_by_identity() {
    let interner = SharedInterner::default();
    let env = Environment::empty();
    let a = closure("function(x) x", &interner, &env);
    let b = closure("function(x) x", &interner, &env);
    assert_eq!(Value::Closure(a.clone()), Value::Closure(a.clone()));
    // Same text, different definition.
    assert_ne!(Value::Closure(a), Value::Closure(b));
}

#[test]
fn environments_compare_by_identity() {
    let env = Environment::empty();
    assert_eq!(Value::Env(env.clone()), Value::Env(env.clone()));
    assert_ne!(Value::Env(env.extend()), Value::Env(env.extend()));
}

#[test]
fn signature_of_non_function_is_internal_error() {
    let interner = SharedInterner::default();
    let env = Environment::empty();
    let mut c = closure("1 + 2", &interner, &env);
    assert!(c.signature().is_err());
    c = closure("function(a, b = 2) a", &interner, &env);
    let (params, _) = c.signature().unwrap();
    assert_eq!(c.arena.get_params(params).len(), 2);
}

#[test]
fn promise_forces_once() {
    let env = Environment::empty();
    let promise = Promise::new(thunk(&env));
    assert!(!promise.is_forced());

    let Force::Run(_) = promise.begin().unwrap() else {
        panic!("fresh promise should run its thunk");
    };
    promise.resolve(Value::number(2.0));
    assert!(promise.is_forced());
    assert_eq!(promise.value(), Some(Value::number(2.0)));

    let Force::Ready(value) = promise.begin().unwrap() else {
        panic!("forced promise should be ready");
    };
    assert_eq!(value, Value::number(2.0));
}

#[test]
fn reentrant_force_is_recursive() {
    let env = Environment::empty();
    let promise = Promise::new(thunk(&env));
    let _running = promise.begin().unwrap();
    let error = promise.begin().err().unwrap();
    assert_eq!(error.kind, EvalErrorKind::RecursivePromise);
}

#[test]
fn abandoned_promise_runs_again() {
    let env = Environment::empty();
    let promise = Promise::new(thunk(&env));
    let Force::Run(thunk) = promise.begin().unwrap() else {
        panic!("fresh promise should run its thunk");
    };
    promise.abandon(thunk);
    assert!(matches!(promise.begin().unwrap(), Force::Run(_)));
}

#[test]
fn lengths() {
    assert_eq!(Value::numbers(vec![1.0, 2.0]).len(), 2);
    assert_eq!(Value::List(vec![(None, Value::Null)]).len(), 1);
    assert!(Value::Null.is_empty());
    assert_eq!(Value::Env(Environment::empty()).len(), 1);
}

#[test]
fn display_forms() {
    let interner = SharedInterner::default();
    let env = Environment::empty().extend_named("package:stats");
    let f = closure("function(x) x + 1", &interner, &env);
    assert_eq!(Value::number(42.0).display(&interner), "[1] 42");
    assert_eq!(Value::Null.display(&interner), "NULL");
    assert_eq!(Value::Closure(f).display(&interner), "function(x) x + 1");
    assert_eq!(Value::Env(env.clone()).display(&interner), "<environment: package:stats>");
    assert_eq!(Value::Env(env.extend()).display(&interner), "<environment>");
    assert_eq!(
        Value::error(crate::errors::stop("boom")).display(&interner),
        "Error: boom"
    );
}

#[test]
fn display_nested_list() {
    let interner = SharedInterner::default();
    let a = interner.intern("a");
    let value = Value::List(vec![
        (Some(a), Value::number(1.0)),
        (
            None,
            Value::List(vec![(None, Value::string("x"))]),
        ),
    ]);
    assert_eq!(
        value.display(&interner),
        "$a\n[1] 1\n\n[[2]]\n[[2]][[1]]\n[1] \"x\"\n\n"
    );
}

#[test]
fn describe_actuals_for_messages() {
    let interner = SharedInterner::default();
    let y = interner.intern("y");
    assert_eq!(describe_actual(&(None, Value::number(4.0)), &interner), "4");
    assert_eq!(describe_actual(&(Some(y), Value::number(2.0)), &interner), "y = 2");
    assert_eq!(describe_actual(&(None, Value::string("a")), &interner), "\"a\"");
    assert_eq!(
        describe_actual(&(None, Value::numbers(vec![1.0, 2.0])), &interner),
        "c(1, 2)"
    );
}
