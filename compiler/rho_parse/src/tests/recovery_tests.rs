use pretty_assertions::assert_eq;

use super::parse_trees;
use crate::ParseError;

#[test]
fn broken_statement_becomes_error_node_and_parsing_continues() {
    let (trees, output) = parse_trees("1 +* 2\nx");
    assert_eq!(output.errors.len(), 1);
    assert!(trees[0].starts_with("(error unexpected '*'"), "{}", trees[0]);
    assert_eq!(trees[1], "x");
}

#[test]
fn empty_block_is_rejected() {
    let (trees, output) = parse_trees("f <- function() {}\n1");
    assert!(matches!(output.errors[..], [ParseError::EmptyBlock { .. }]));
    assert_eq!(trees.len(), 2);
    assert_eq!(trees[1], "1");
}

#[test]
fn repeated_formal_is_rejected() {
    let (_, output) = parse_trees("function(x, x) 1");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(
        output.errors[0].to_string(),
        "repeated formal argument 'x'"
    );
}

#[test]
fn invalid_assignment_target() {
    let (trees, output) = parse_trees("3 <- 1\n2");
    assert_eq!(
        trees[0],
        "(error invalid (do_set) left-hand side to assignment)"
    );
    assert_eq!(trees[1], "2");
    assert_eq!(output.errors.len(), 1);
}

#[test]
fn missing_close_paren_skips_to_next_line() {
    let (trees, output) = parse_trees("f(1 2)\ny");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(trees.len(), 2);
    assert_eq!(trees[1], "y");
}

#[test]
fn recovery_skips_the_rest_of_an_open_block() {
    let (trees, output) = parse_trees("{ a b\n c }\nz");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(trees.len(), 2);
    assert_eq!(trees[1], "z");
}

#[test]
fn else_on_a_new_top_level_line_is_an_error() {
    let (trees, output) = parse_trees("if (a) 1\nelse 2");
    assert_eq!(trees[0], "(if a 1)");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].to_string(), "unexpected 'else'");
}

#[test]
fn lexer_errors_surface_with_their_message() {
    let (trees, output) = parse_trees("1 ? 2\n3");
    assert_eq!(trees[0], "(error unexpected input '?')");
    assert_eq!(trees[1], "3");
    assert_eq!(output.errors.len(), 1);
}

#[test]
fn statements_must_be_separated() {
    let (trees, output) = parse_trees("f(x){x}; f(1)");
    assert_eq!(output.errors.len(), 1);
    assert_eq!(trees[1], "(f 1)");
}
