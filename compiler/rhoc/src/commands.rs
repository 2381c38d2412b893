//! Driver commands: run a file, evaluate text, or parse and print back.

use std::io::IsTerminal;

use rho_eval::{silent_handler, stdout_handler, Interpreter, SharedPrintHandler, Value};
use rho_ir::{deparse, StringInterner};

use crate::report;

#[derive(Clone, Copy, Debug, Default)]
pub struct RunOptions {
    pub max_depth: Option<usize>,
    pub quiet: bool,
}

pub fn run_file(path: &str, options: &RunOptions) {
    let source = read_file(path);
    let handler = if options.quiet {
        silent_handler()
    } else {
        stdout_handler()
    };
    let diagnostics = run_source(path, &source, options, handler, stderr_color());
    exit_on_errors(&diagnostics);
}

pub fn eval_text(source: &str) {
    let diagnostics = run_source(
        "<eval>",
        source,
        &RunOptions::default(),
        stdout_handler(),
        stderr_color(),
    );
    exit_on_errors(&diagnostics);
}

/// Print each top-level statement of `path` back as source.
pub fn parse_file(path: &str) {
    let source = read_file(path);
    let interner = StringInterner::new();
    let program = rho_parse::parse(&source, &interner);
    if program.has_errors() {
        let color = stderr_color();
        let diagnostics: Vec<String> = program
            .errors
            .iter()
            .map(|e| report::parse_error(path, &source, e, color))
            .collect();
        exit_on_errors(&diagnostics);
    }
    for &expr in &program.exprs {
        println!("{}", deparse(&program.arena, &interner, expr));
    }
}

/// Evaluate `source`, printing visible values through `handler`.
///
/// Returns rendered diagnostics, empty when everything succeeded. Parse
/// errors stop the run before anything is evaluated; evaluation errors are
/// collected and the remaining statements still run.
pub(crate) fn run_source(
    path: &str,
    source: &str,
    options: &RunOptions,
    handler: SharedPrintHandler,
    color: bool,
) -> Vec<String> {
    let mut builder = Interpreter::builder().print_handler(handler);
    if let Some(depth) = options.max_depth {
        builder = builder.max_call_depth(depth);
    }
    let mut interp = builder.build();

    let program = rho_parse::parse(source, interp.interner());
    if program.has_errors() {
        return program
            .errors
            .iter()
            .map(|e| report::parse_error(path, source, e, color))
            .collect();
    }

    let outcomes = match interp.run(&program) {
        Ok(outcomes) => outcomes,
        Err(internal) => {
            tracing::error!(%internal, path, "evaluation aborted");
            return vec![format!("internal error: {internal}\n")];
        }
    };

    let mut diagnostics = Vec::new();
    for outcome in &outcomes {
        match &outcome.value {
            Value::Error(error) => diagnostics.push(report::eval_error(path, source, error, color)),
            value if outcome.visible => {
                let text = value.display(interp.interner());
                interp.print_handler().println(&text);
            }
            _ => {}
        }
    }
    diagnostics
}

fn exit_on_errors(diagnostics: &[String]) {
    if diagnostics.is_empty() {
        return;
    }
    for diagnostic in diagnostics {
        eprint!("{diagnostic}");
    }
    std::process::exit(1);
}

fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("error: cannot read '{path}': {e}");
            std::process::exit(1);
        }
    }
}

fn stderr_color() -> bool {
    std::io::stderr().is_terminal()
}

#[cfg(test)]
mod tests;
