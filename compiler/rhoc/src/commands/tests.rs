use pretty_assertions::assert_eq;

use super::{run_source, RunOptions};
use rho_eval::buffer_handler;

fn run(source: &str, options: &RunOptions) -> (String, Vec<String>) {
    let handler = buffer_handler();
    let diagnostics = run_source("test.R", source, options, handler.clone(), false);
    (handler.output(), diagnostics)
}

#[test]
fn prints_visible_values_only() {
    let (out, diagnostics) = run("x <- 3 + 4\nx\ninvisible(5)\n(y <- 2)", &RunOptions::default());
    assert_eq!(out, "[1] 7\n[1] 2\n");
    assert!(diagnostics.is_empty());
}

#[test]
fn output_from_print_and_cat() {
    let (out, _) = run("cat(\"a\", 1, \"\\n\")\nprint(\"b\")", &RunOptions::default());
    assert_eq!(out, "a 1 \n[1] \"b\"\n");
}

#[test]
fn errors_are_collected_and_the_run_continues() {
    let (out, diagnostics) = run("nothing\n1 + 1", &RunOptions::default());
    assert_eq!(out, "[1] 2\n");
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("object 'nothing' not found"));
}

#[test]
fn parse_errors_stop_before_evaluation() {
    let (out, diagnostics) = run("print(1)\n1 +", &RunOptions::default());
    assert_eq!(out, "");
    assert!(!diagnostics.is_empty());
}

#[test]
fn depth_limit_option() {
    let options = RunOptions {
        max_depth: Some(10),
        quiet: false,
    };
    let (_, diagnostics) = run("f <- function() f()\nf()", &options);
    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics[0].contains("infinite recursion"));
}
