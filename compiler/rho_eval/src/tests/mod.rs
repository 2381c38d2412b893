//! Whole-program scenarios: source text in, top-level values out.

mod frames;
mod programs;

use crate::print_handler::silent_handler;
use crate::{Interpreter, Value};

fn interpreter() -> Interpreter {
    Interpreter::builder().print_handler(silent_handler()).build()
}

fn eval(source: &str) -> Vec<Value> {
    interpreter().eval_source(source).unwrap()
}

fn last(source: &str) -> Value {
    eval(source).pop().unwrap()
}

fn number(value: &Value) -> f64 {
    match value {
        Value::Vector(v) => v.as_f64s().unwrap()[0],
        other => panic!("expected a number, got {other:?}"),
    }
}

fn string(value: &Value) -> String {
    match value {
        Value::Vector(v) => v.as_strings().swap_remove(0),
        other => panic!("expected a string, got {other:?}"),
    }
}

fn message(value: &Value) -> String {
    match value {
        Value::Error(e) => e.message.clone(),
        other => panic!("expected an error, got {other:?}"),
    }
}
