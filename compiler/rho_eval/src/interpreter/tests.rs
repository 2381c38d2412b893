use pretty_assertions::assert_eq;

use super::*;
use crate::print_handler::{buffer_handler, silent_handler};

fn interpreter() -> Interpreter {
    Interpreter::builder().print_handler(silent_handler()).build()
}

fn visibility(source: &str) -> Vec<bool> {
    interpreter()
        .run_source(source)
        .unwrap()
        .into_iter()
        .map(|outcome| outcome.visible)
        .collect()
}

#[test]
fn assignment_is_invisible() {
    assert_eq!(visibility("x <- 1\nx\n(x <- 2)"), vec![false, true, true]);
}

#[test]
fn invisible_and_print_suppress_auto_print() {
    assert_eq!(
        visibility("invisible(3)\nprint(3)\nidentity(3)"),
        vec![false, false, true]
    );
}

#[test]
fn if_without_else_is_invisible_when_false() {
    assert_eq!(visibility("if (FALSE) 1\nif (TRUE) 1"), vec![false, true]);
}

#[test]
fn library_is_invisible() {
    assert_eq!(visibility("library(stats)"), vec![false]);
}

#[test]
fn errors_are_values_and_run_continues() {
    let values = interpreter().eval_source("stop(\"first\")\n1 + 1").unwrap();
    assert!(values[0].is_error());
    assert_eq!(values[1], Value::number(2.0));
}

#[test]
fn parse_errors_become_error_values() {
    let values = interpreter().eval_source("1 +* 2\n3").unwrap();
    assert!(values[0].is_error());
    assert_eq!(values[1], Value::number(3.0));
}

#[test]
fn program_parsed_separately_shares_the_interner() {
    let mut interp = interpreter();
    let program = rho_parse::parse("y <- 5; y * 2", interp.interner());
    let values = interp.eval_program(&program).unwrap();
    assert_eq!(values[1], Value::number(10.0));
}

#[test]
fn topology_is_global_over_base_over_empty() {
    let interp = interpreter();
    assert!(interp.global().is_global());
    let base = interp.global().enclosure().unwrap();
    assert!(base.ptr_eq(interp.base()));
    assert_eq!(base.enclosure().unwrap().name().as_deref(), Some("R_EmptyEnv"));
}

#[test]
fn builtins_live_in_base() {
    let interp = interpreter();
    let seq = interp.interner().intern("seq");
    assert!(interp.base().contains_local(seq));
    assert!(!interp.global().contains_local(seq));
}

#[test]
fn output_goes_to_the_print_handler() {
    let handler = buffer_handler();
    let mut interp = Interpreter::builder().print_handler(handler.clone()).build();
    interp
        .eval_source("print(c(a = 1, b = 2))\ncat(\"x\", 1/3, \"\\n\")")
        .unwrap();
    assert_eq!(handler.output(), "a b\n1 2\nx 0.3333333 \n");
}

#[test]
fn custom_registry() {
    fn init(scope: &mut PackageScope<'_>) -> EvalResult<()> {
        scope.store("answer", Value::number(42.0));
        Ok(())
    }
    let mut registry = PackageRegistry::new();
    registry.register("deep", init);
    let mut interp = Interpreter::builder()
        .print_handler(silent_handler())
        .registry(SharedRegistry::new(registry))
        .build();
    let values = interp
        .eval_source("library(deep)\nanswer\nlibrary(stats)")
        .unwrap();
    assert_eq!(values[1], Value::number(42.0));
    assert!(values[2].is_error());
}

#[test]
fn dropping_releases_closure_cycles() {
    let mut interp = interpreter();
    let values = interp
        .eval_source("f <- function() environment()\ne <- f()\ne")
        .unwrap();
    let Value::Env(env) = &values[2] else {
        panic!("expected an environment, got {values:?}");
    };
    let weak = env.downgrade();
    drop(values);
    drop(interp);
    assert!(weak.upgrade().is_none());
}

#[test]
fn unread_default_does_not_keep_its_frame_alive() {
    let mut interp = interpreter();
    let values = interp
        .eval_source("f <- function(y = 1) environment()\ne <- f()\ne")
        .unwrap();
    let Value::Env(env) = &values[2] else {
        panic!("expected an environment, got {values:?}");
    };
    let weak = env.downgrade();
    drop(values);
    interp.eval_source("e <- NULL").unwrap();
    assert!(weak.upgrade().is_none());
}

#[test]
fn default_read_after_the_call_returns() {
    let values = interpreter()
        .eval_source("f <- function(y = 2) function() y * 10\ng <- f()\ng()")
        .unwrap();
    assert_eq!(values[2], Value::number(20.0));
}
