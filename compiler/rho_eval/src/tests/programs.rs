use pretty_assertions::assert_eq;

use super::{eval, last, number, string};
use crate::Value;

#[test]
fn assignment_forms() {
    let values = eval("x <- 3 + 4\ny = x * 5\nx + y");
    let numbers: Vec<f64> = values.iter().map(number).collect();
    assert_eq!(numbers, vec![7.0, 35.0, 42.0]);
}

#[test]
fn rightward_assignment() {
    assert_eq!(number(&last("10 -> a\na * 2")), 20.0);
}

#[test]
fn semicolons_separate_top_level_expressions() {
    assert_eq!(eval("1; 2; 3").len(), 3);
}

#[test]
fn recursion() {
    let source = "fact <- function(n) if (n <= 1) 1 else n * fact(n - 1)\nfact(10)";
    assert_eq!(number(&last(source)), 3_628_800.0);
}

#[test]
fn blocks_yield_their_last_value() {
    assert_eq!(number(&last("{ a <- 1; b <- 2; a + b }")), 3.0);
    assert!(matches!(last("{ }"), Value::Error(_)));
}

#[test]
fn backtick_names() {
    assert_eq!(number(&last("`my var` <- 4\n`my var` + 1")), 5.0);
    assert_eq!(number(&last("`+`(2, 3)")), 5.0);
}

#[test]
fn string_callee_finds_function() {
    assert_eq!(number(&last("\"sum\"(1, 2)")), 3.0);
}

#[test]
fn function_lookup_skips_non_functions() {
    assert_eq!(number(&last("sum <- 1\nsum(2, 3)")), 5.0);
}

#[test]
fn replacement_functions_nest() {
    let source = "x <- c(a = 1, b = 2)\nnames(x)[2] <- \"z\"\npaste(names(x), collapse = \",\")";
    assert_eq!(string(&last(source)), "a,z");
}

#[test]
fn user_defined_replacement_function() {
    let source = "`second<-` <- function(x, value) { x[2] <- value; x }\n\
                  v <- c(1, 2, 3)\nsecond(v) <- 9\nv[[2]]";
    assert_eq!(number(&last(source)), 9.0);
}

#[test]
fn quote_captures_code() {
    assert_eq!(string(&last("deparse(quote(f(x, y = 2)))")), "f(x, y = 2)");
}

#[test]
fn library_attaches_definitions() {
    let values = eval("library(stats)\nsd(c(2, 4, 4, 4, 5, 5, 7, 9))");
    assert!(matches!(values[0], Value::Package(_)));
    assert!((number(&values[1]) - 2.138_090).abs() < 1e-6);
}

#[test]
fn library_by_string() {
    assert!(matches!(last("library(\"stats\")"), Value::Package(_)));
}

#[test]
fn global_definitions_shadow_packages() {
    assert_eq!(number(&last("library(stats)\nmean <- function(x) 0\nmean(c(1, 2))")), 0.0);
}
