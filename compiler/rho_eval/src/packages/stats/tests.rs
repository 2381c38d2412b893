use pretty_assertions::assert_eq;

use super::erfc;
use crate::print_handler::silent_handler;
use crate::{Interpreter, Value};

fn eval(source: &str) -> Vec<Value> {
    let mut interp = Interpreter::builder().print_handler(silent_handler()).build();
    interp.eval_source(source).unwrap()
}

fn numbers(value: &Value) -> Vec<f64> {
    value.as_vector().unwrap().as_f64s().unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "{actual} is not close to {expected}"
    );
}

#[test]
fn erfc_reference_points() {
    assert_close(erfc(0.0), 1.0);
    assert_close(erfc(1.0), 0.157_299_2);
    assert_close(erfc(-1.0), 1.842_700_8);
}

#[test]
fn not_visible_before_library() {
    let values = eval("mean(c(1, 2))");
    let Value::Error(error) = &values[0] else {
        panic!("expected an error, got {values:?}");
    };
    assert_eq!(error.message, "could not find function \"mean\"");
}

#[test]
fn mean_and_var() {
    let values = eval("library(stats)\nmean(c(1, 2, 3, 4))\nvar(c(1, 2, 3, 4))");
    assert_eq!(numbers(&values[1]), vec![2.5]);
    assert_close(numbers(&values[2])[0], 5.0 / 3.0);
}

#[test]
fn sd_is_defined_in_source() {
    let values = eval("library(stats)\nsd(c(2, 4, 4, 4, 5, 5, 7, 9))");
    assert_close(numbers(&values[1])[0], (32.0_f64 / 7.0).sqrt());
}

#[test]
fn scale01_uses_base_builtins() {
    let values = eval("library(stats)\nscale01(c(1, 3, 5))");
    assert_eq!(numbers(&values[1]), vec![0.0, 0.5, 1.0]);
}

#[test]
fn normal_distribution_defaults() {
    let values = eval(
        "library(stats)\ndnorm(0)\npnorm(1.96)\npnorm(0, mean = 1, sd = 2, lower.tail = FALSE)",
    );
    assert_close(numbers(&values[1])[0], 0.398_942_3);
    assert_close(numbers(&values[2])[0], 0.975_002_1);
    assert_close(numbers(&values[3])[0], 0.691_462_5);
}

#[test]
fn resolver_rejects_text() {
    let values = eval("library(stats)\nmean(\"a\")");
    let Value::Error(error) = &values[1] else {
        panic!("expected an error, got {values:?}");
    };
    assert_eq!(error.message, "invalid 'x' argument");
    assert!(error.span.is_some());
}
