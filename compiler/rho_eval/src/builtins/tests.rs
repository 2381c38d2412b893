use pretty_assertions::assert_eq;

use crate::print_handler::silent_handler;
use crate::{Interpreter, Value};

fn last(source: &str) -> Value {
    let mut interp = Interpreter::builder().print_handler(silent_handler()).build();
    interp.eval_source(source).unwrap().pop().unwrap()
}

fn numbers(source: &str) -> Vec<f64> {
    match last(source) {
        Value::Vector(v) => v.as_f64s().unwrap(),
        other => panic!("expected a vector, got {other:?}"),
    }
}

fn strings(source: &str) -> Vec<String> {
    match last(source) {
        Value::Vector(v) => v.as_strings(),
        other => panic!("expected a vector, got {other:?}"),
    }
}

fn error(source: &str) -> String {
    match last(source) {
        Value::Error(e) => e.message,
        other => panic!("expected an error, got {other:?}"),
    }
}

fn shown(source: &str) -> String {
    let mut interp = Interpreter::builder().print_handler(silent_handler()).build();
    let value = interp.eval_source(source).unwrap().pop().unwrap();
    value.display(interp.interner())
}

#[test]
fn arithmetic_operators() {
    assert_eq!(numbers("1 + 2 * 3"), vec![7.0]);
    assert_eq!(numbers("c(1, 2, 3, 4) - 1"), vec![0.0, 1.0, 2.0, 3.0]);
    assert_eq!(numbers("2 ^ 10"), vec![1024.0]);
    assert_eq!(numbers("5 %% 3"), vec![2.0]);
    assert_eq!(numbers("-5 %/% 2"), vec![-3.0]);
    assert_eq!(numbers("-c(1, 2)"), vec![-1.0, -2.0]);
    assert_eq!(numbers("NULL + 1"), Vec::<f64>::new());
}

#[test]
fn arithmetic_on_text_fails() {
    assert_eq!(error("\"a\" + 1"), "non-numeric argument to binary operator");
    assert_eq!(error("-\"a\""), "invalid argument to unary operator");
}

#[test]
fn comparison_and_logic() {
    assert_eq!(last("c(1, 5) > 2"), Value::Vector(rho_vector::Vector::logical(vec![false, true])));
    assert_eq!(last("TRUE && FALSE"), Value::boolean(false));
    assert_eq!(last("!c(TRUE, FALSE) | FALSE"), Value::Vector(rho_vector::Vector::logical(vec![false, true])));
    assert_eq!(error("NULL && TRUE"), "invalid 'x' length in 'x && y'");
}

#[test]
fn short_circuit_skips_the_right_side() {
    assert_eq!(last("FALSE && stop(\"x\")"), Value::boolean(false));
    assert_eq!(last("TRUE || stop(\"x\")"), Value::boolean(true));
    assert_eq!(last("FALSE || TRUE"), Value::boolean(true));
    assert_eq!(error("TRUE && stop(\"boom\")"), "boom");
    assert_eq!(numbers("n <- 0\nFALSE && (n <- 1)\nn"), vec![0.0]);
    assert_eq!(error("TRUE && NULL"), "invalid 'y' length in 'x && y'");
}

#[test]
fn short_circuit_through_dots_evaluates_both_sides() {
    let source = "f <- function(...) `&&`(...)\nf(FALSE, TRUE)";
    assert_eq!(last(source), Value::boolean(false));
}

#[test]
fn sequences() {
    assert_eq!(numbers("1:4"), vec![1.0, 2.0, 3.0, 4.0]);
    assert_eq!(numbers("3:1"), vec![3.0, 2.0, 1.0]);
    assert_eq!(numbers("seq(10, 1, by = -3)"), vec![10.0, 7.0, 4.0, 1.0]);
    assert_eq!(numbers("seq(0, 1, length.out = 3)"), vec![0.0, 0.5, 1.0]);
    assert_eq!(error("seq(1, 10, step = 2)"), "unused argument (step = 2)");
}

#[test]
fn combine() {
    assert_eq!(strings("names(c(a = 1, 2))"), vec!["a", ""]);
    assert_eq!(last("c()"), Value::Null);
    assert_eq!(strings("c(1, \"a\", TRUE)"), vec!["1", "a", "TRUE"]);
    assert_eq!(numbers("length(c(list(1), 2))"), vec![2.0]);
}

#[test]
fn names_replacement() {
    assert_eq!(
        strings("x <- c(1, 2)\nnames(x) <- c(\"a\", \"b\")\nnames(x)[2] <- \"z\"\nnames(x)"),
        vec!["a", "z"]
    );
    assert_eq!(last("x <- c(a = 1)\nnames(x) <- NULL\nnames(x)"), Value::Null);
}

#[test]
fn vector_indexing() {
    let x = "x <- c(10, 20, 30)\n";
    assert_eq!(numbers(&format!("{x}x[2]")), vec![20.0]);
    assert_eq!(numbers(&format!("{x}x[-1]")), vec![20.0, 30.0]);
    assert_eq!(numbers(&format!("{x}x[c(TRUE, FALSE)]")), vec![10.0, 30.0]);
    assert_eq!(numbers(&format!("{x}x[[3]]")), vec![30.0]);
    assert_eq!(numbers(&format!("{x}x[2] <- 0\nx")), vec![10.0, 0.0, 30.0]);
    assert_eq!(numbers(&format!("{x}x[5] <- 1\nlength(x)")), vec![5.0]);
    assert_eq!(error(&format!("{x}x[[4]]")), "subscript out of bounds");
}

#[test]
fn list_access() {
    let l = "l <- list(a = 1, b = \"two\")\n";
    assert_eq!(strings(&format!("{l}l$b")), vec!["two"]);
    assert_eq!(numbers(&format!("{l}l[[\"a\"]]")), vec![1.0]);
    assert_eq!(numbers(&format!("{l}l[[1]]")), vec![1.0]);
    assert_eq!(last(&format!("{l}l$zzz")), Value::Null);
    assert_eq!(numbers(&format!("{l}length(l[2])")), vec![1.0]);
}

#[test]
fn list_replacement() {
    let l = "l <- list(a = 1, b = \"two\")\n";
    assert_eq!(numbers(&format!("{l}l$c <- 3\nlength(l)")), vec![3.0]);
    assert_eq!(strings(&format!("{l}l$a <- NULL\nnames(l)")), vec!["b"]);
    assert_eq!(numbers(&format!("{l}l[[\"b\"]] <- 2\nl$b")), vec![2.0]);
    assert_eq!(numbers(&format!("{l}l[[\"a\"]] <- NULL\nlength(l)")), vec![1.0]);
}

#[test]
fn environment_access() {
    assert_eq!(numbers("e <- new.env()\ne$x <- 5\ne$x"), vec![5.0]);
    assert_eq!(numbers("e <- new.env()\ne[[\"y\"]] <- 6\ne[[\"y\"]]"), vec![6.0]);
    assert_eq!(strings("e <- new.env()\ne$b <- 1\ne$a <- 2\nnames(e)"), vec!["a", "b"]);
}

#[test]
fn dollar_on_vector_fails() {
    assert_eq!(error("x <- 1\nx$a"), "$ operator is invalid for atomic vectors");
}

#[test]
fn math() {
    assert_eq!(numbers("sum(1:4)"), vec![10.0]);
    assert_eq!(numbers("sum()"), vec![0.0]);
    assert_eq!(numbers("sqrt(c(4, 16))"), vec![2.0, 4.0]);
    assert_eq!(numbers("log(100, 10)"), vec![2.0]);
    assert_eq!(numbers("log(1)"), vec![0.0]);
    assert_eq!(numbers("abs(-3)"), vec![3.0]);
    assert_eq!(numbers("min(c(3, 1), 2)"), vec![1.0]);
    assert_eq!(numbers("max()"), vec![f64::NEG_INFINITY]);
    assert_eq!(error("sum(\"a\")"), "invalid 'type' (character) of argument");
}

#[test]
fn paste_recycles_and_collapses() {
    assert_eq!(strings("paste(\"a\", 1:2)"), vec!["a 1", "a 2"]);
    assert_eq!(strings("paste(\"x\", \"y\", sep = \"-\")"), vec!["x-y"]);
    assert_eq!(strings("paste(c(\"a\", \"b\"), collapse = \"+\")"), vec!["a+b"]);
    assert_eq!(strings("paste(\"a\", NULL, \"b\")"), vec!["a b"]);
}

#[test]
fn factors() {
    assert_eq!(strings("levels(factor(c(\"lo\", \"hi\", \"lo\")))"), vec!["hi", "lo"]);
    assert_eq!(strings("levels(factor(c(10, 9, 10)))"), vec!["9", "10"]);
    assert_eq!(
        strings("f <- factor(c(\"a\", \"b\"), labels = c(\"A\", \"B\"))\nc(levels(f), paste(f))"),
        vec!["A", "B", "A", "B"]
    );
    assert_eq!(
        shown("factor(c(\"x\", \"y\"), levels = c(\"y\", \"x\"))"),
        "[1] x y\nLevels: y x"
    );
    assert_eq!(last("levels(1)"), Value::Null);
}

#[test]
fn datetimes() {
    assert_eq!(numbers("as.POSIXct(\"2024-03-01 12:30:00\")"), vec![1_709_296_200.0]);
    assert_eq!(
        shown("as.POSIXct(\"2024-03-01 12:30:00\", tz = \"UTC\")"),
        "[1] \"2024-03-01 12:30:00 UTC\""
    );
    assert_eq!(
        error("as.POSIXct(\"2024-01-01\", tz = \"EST\")"),
        "unsupported time zone 'EST'"
    );
    assert_eq!(
        error("as.POSIXct(\"yesterday\")"),
        "character string is not in a standard unambiguous format"
    );
}

#[test]
fn deparse_values() {
    assert_eq!(strings("deparse(quote(x + 1))"), vec!["x + 1"]);
    assert_eq!(strings("deparse(c(1, 2.5))"), vec!["c(1, 2.5)"]);
    assert_eq!(strings("deparse(\"a\")"), vec!["\"a\""]);
    assert_eq!(strings("deparse(function(x) x)"), vec!["function(x) x"]);
}

#[test]
fn predicates_and_stop() {
    assert_eq!(last("is.null(NULL)"), Value::boolean(true));
    assert_eq!(last("is.function(sum)"), Value::boolean(true));
    assert_eq!(last("is.function(1)"), Value::boolean(false));
    assert_eq!(error("stop(\"bad \", \"thing\")"), "bad thing");
}
