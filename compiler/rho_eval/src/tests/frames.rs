use pretty_assertions::assert_eq;

use super::{last, message, number, string};
use crate::Value;

#[test]
fn environment_is_the_current_frame() {
    assert_eq!(string(&last("environmentName(environment())")), "R_GlobalEnv");
    let source = "f <- function() { x <- 3; environment() }\ne <- f()\ne$x";
    assert_eq!(number(&last(source)), 3.0);
}

#[test]
fn environment_of_a_closure() {
    let source = "make <- function() { k <- 7; function() k }\nh <- make()\nenvironment(h)$k";
    assert_eq!(number(&last(source)), 7.0);
}

#[test]
fn parent_frame_is_the_caller() {
    let source = "g <- function() parent.frame()$who\n\
                  f <- function() { who <- \"f\"; g() }\nf()";
    assert_eq!(string(&last(source)), "f");
}

#[test]
fn parent_frame_at_top_level_is_global() {
    assert_eq!(string(&last("environmentName(parent.frame())")), "R_GlobalEnv");
}

#[test]
fn parent_frame_counts_generations() {
    let source = "h <- function() parent.frame(2)$who\n\
                  g <- function() { who <- \"g\"; h() }\n\
                  f <- function() { who <- \"f\"; g() }\nf()";
    assert_eq!(string(&last(source)), "f");
}

#[test]
fn parent_frame_differs_from_lexical_scope() {
    let source = "who <- \"global\"\n\
                  g <- function() parent.frame()$who\n\
                  f <- function() { who <- \"f\"; g() }\nc(f(), g())";
    match last(source) {
        Value::Vector(v) => assert_eq!(v.as_strings(), vec!["f", "global"]),
        other => panic!("expected a vector, got {other:?}"),
    }
}

#[test]
fn sys_call_is_the_running_call() {
    let source = "f <- function(x) deparse(sys.call())\nf(1 + 2)";
    assert_eq!(string(&last(source)), "f(1 + 2)");
}

#[test]
fn sys_call_counts_from_the_outermost() {
    let source = "g <- function() deparse(sys.call(1))\nf <- function() g()\nf()";
    assert_eq!(string(&last(source)), "f()");
}

#[test]
fn sys_function_is_the_running_function() {
    let source = "f <- function() sys.function()\nis.function(f())";
    assert_eq!(last(source), Value::boolean(true));
}

#[test]
fn sys_call_out_of_range() {
    assert!(matches!(last("f <- function() sys.call(5)\nf()"), Value::Error(_)));
}

#[test]
fn sys_call_huge_negative_index_is_an_error() {
    let value = last("f <- function() sys.call(-1e300)\nf()");
    assert_eq!(message(&value), "call-stack index out of range");
    let value = last("f <- function() sys.function(-1e300)\nf()");
    assert_eq!(message(&value), "call-stack index out of range");
}

#[test]
fn parent_frame_past_the_outermost_call_is_global() {
    let source = "f <- function() environmentName(parent.frame(1e300))\nf()";
    assert_eq!(string(&last(source)), "R_GlobalEnv");
}

#[test]
fn new_env_encloses_the_caller() {
    let source = "base_value <- 4\ne <- new.env()\ne$y <- 1\nnames(e)";
    assert_eq!(string(&last(source)), "y");
}
