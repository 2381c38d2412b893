//! Turning nodes back into source text.
//!
//! Used for quoted expressions, `deparse()`, function printing and
//! `rhoc parse`. Parentheses are explicit `Paren` nodes, so infix operators
//! are printed without precedence analysis.

use std::fmt::Write;

use super::ast::{ArgRange, ParamRange};
use super::{ExprArena, ExprId, ExprKind, ExprRange, ExprVisitor, Name, Span, StringInterner};

const INDENT: usize = 4;

const RESERVED: &[&str] = &[
    "if", "else", "repeat", "while", "function", "for", "next", "break", "TRUE", "FALSE",
    "NULL", "Inf", "NaN", "NA", "in",
];

/// Whether `s` can be written without backticks.
pub fn is_syntactic_name(s: &str) -> bool {
    if s == "..." {
        return true;
    }
    let mut chars = s.chars();
    let valid_start = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => true,
        Some('.') => !s[1..].starts_with(|c: char| c.is_ascii_digit()),
        _ => false,
    };
    valid_start
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_')
        && !RESERVED.contains(&s)
}

fn is_binary_operator(s: &str) -> bool {
    matches!(
        s,
        "+" | "-" | "*" | "/" | "^" | "==" | "!=" | "<" | ">" | "<=" | ">=" | "&" | "&&" | "|"
            | "||"
    ) || (s.len() >= 2 && s.starts_with('%') && s.ends_with('%'))
}

/// Write a number the way the language prints literals.
pub fn format_number(value: f64, out: &mut String) {
    if value.is_nan() {
        out.push_str("NaN");
    } else if value.is_infinite() {
        out.push_str(if value > 0.0 { "Inf" } else { "-Inf" });
    } else {
        let _ = write!(out, "{value}");
    }
}

/// Write `s` as a double-quoted literal.
pub fn quote_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
}

/// Pretty-printer over the syntax tree.
pub struct Deparser<'a> {
    arena: &'a ExprArena,
    interner: &'a StringInterner,
    out: String,
    indent: usize,
}

impl<'a> Deparser<'a> {
    pub fn new(arena: &'a ExprArena, interner: &'a StringInterner) -> Self {
        Deparser {
            arena,
            interner,
            out: String::new(),
            indent: 0,
        }
    }

    pub fn finish(self) -> String {
        self.out
    }

    fn name(&mut self, name: Name) {
        let text = self.interner.lookup(name);
        if is_syntactic_name(text) {
            self.out.push_str(text);
        } else {
            self.out.push('`');
            self.out.push_str(text);
            self.out.push('`');
        }
    }

    fn args(&mut self, args: ArgRange) {
        let arena = self.arena;
        for (i, arg) in arena.get_args(args).iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            if let Some(name) = arg.name {
                self.name(name);
                self.out.push_str(" = ");
            }
            self.visit_expr(arg.value);
        }
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push(' ');
        }
    }

    /// Print `func(args)` in operator form when it has one. Returns false if
    /// the call has to be printed as a plain call.
    fn operator_call(&mut self, func: ExprId, args: ArgRange) -> bool {
        let arena = self.arena;
        let ExprKind::Ident(op) = arena.get_expr(func).kind else {
            return false;
        };
        let op_text = self.interner.lookup(op);
        let actuals = arena.get_args(args);
        if actuals.iter().any(|a| a.name.is_some()) {
            return false;
        }
        match (op_text, actuals) {
            ("-" | "+" | "!", [operand]) => {
                self.out.push_str(op_text);
                self.visit_expr(operand.value);
                true
            }
            ("$", [object, field]) => {
                self.visit_expr(object.value);
                self.out.push('$');
                match arena.get_expr(field.value).kind {
                    ExprKind::Str(name) | ExprKind::Ident(name) => self.name(name),
                    _ => self.visit_expr(field.value),
                }
                true
            }
            ("[" | "[[", [object, rest @ ..]) => {
                self.visit_expr(object.value);
                self.out.push_str(op_text);
                for (i, index) in rest.iter().enumerate() {
                    if i > 0 {
                        self.out.push_str(", ");
                    }
                    self.visit_expr(index.value);
                }
                self.out.push_str(if op_text == "[" { "]" } else { "]]" });
                true
            }
            (_, [lhs, rhs]) if is_binary_operator(op_text) => {
                self.visit_expr(lhs.value);
                if op_text == "^" {
                    self.out.push('^');
                } else {
                    self.out.push(' ');
                    self.out.push_str(op_text);
                    self.out.push(' ');
                }
                self.visit_expr(rhs.value);
                true
            }
            _ => false,
        }
    }
}

impl ExprVisitor for Deparser<'_> {
    type Output = ();

    fn arena(&self) -> &ExprArena {
        self.arena
    }

    fn visit_number(&mut self, value: f64, _span: Span) {
        format_number(value, &mut self.out);
    }

    fn visit_str(&mut self, value: Name, _span: Span) {
        quote_string(self.interner.lookup(value), &mut self.out);
    }

    fn visit_bool(&mut self, value: bool, _span: Span) {
        self.out.push_str(if value { "TRUE" } else { "FALSE" });
    }

    fn visit_null(&mut self, _span: Span) {
        self.out.push_str("NULL");
    }

    fn visit_missing(&mut self, _span: Span) {}

    fn visit_ident(&mut self, name: Name, _span: Span) {
        self.name(name);
    }

    fn visit_dots(&mut self, _span: Span) {
        self.out.push_str("...");
    }

    fn visit_assign(&mut self, target: ExprId, value: ExprId, _span: Span) {
        self.visit_expr(target);
        self.out.push_str(" <- ");
        self.visit_expr(value);
    }

    fn visit_assign_inherited(&mut self, target: ExprId, value: ExprId, _span: Span) {
        self.visit_expr(target);
        self.out.push_str(" <<- ");
        self.visit_expr(value);
    }

    fn visit_function(&mut self, _id: ExprId, params: ParamRange, body: ExprId, _span: Span) {
        self.out.push_str("function(");
        let arena = self.arena;
        for (i, param) in arena.get_params(params).iter().enumerate() {
            if i > 0 {
                self.out.push_str(", ");
            }
            self.name(param.name);
            if let Some(default) = param.default {
                self.out.push_str(" = ");
                self.visit_expr(default);
            }
        }
        self.out.push_str(") ");
        self.visit_expr(body);
    }

    fn visit_call(&mut self, _id: ExprId, func: ExprId, args: ArgRange, _span: Span) {
        if self.operator_call(func, args) {
            return;
        }
        self.visit_expr(func);
        self.out.push('(');
        self.args(args);
        self.out.push(')');
    }

    fn visit_block(&mut self, exprs: ExprRange, _span: Span) {
        self.out.push('{');
        self.indent += INDENT;
        let arena = self.arena;
        for &expr in arena.get_expr_list(exprs) {
            self.newline();
            self.visit_expr(expr);
        }
        self.indent -= INDENT;
        self.newline();
        self.out.push('}');
    }

    fn visit_range(&mut self, from: ExprId, to: ExprId, _span: Span) {
        self.visit_expr(from);
        self.out.push(':');
        self.visit_expr(to);
    }

    fn visit_library(&mut self, name: Name, _span: Span) {
        self.out.push_str("library(");
        self.name(name);
        self.out.push(')');
    }

    fn visit_paren(&mut self, inner: ExprId, _span: Span) {
        self.out.push('(');
        self.visit_expr(inner);
        self.out.push(')');
    }

    fn visit_if(&mut self, cond: ExprId, then: ExprId, else_: Option<ExprId>, _span: Span) {
        self.out.push_str("if (");
        self.visit_expr(cond);
        self.out.push_str(") ");
        self.visit_expr(then);
        if let Some(else_) = else_ {
            self.out.push_str(" else ");
            self.visit_expr(else_);
        }
    }

    fn visit_quote(&mut self, inner: ExprId, _span: Span) {
        self.out.push_str("quote(");
        self.visit_expr(inner);
        self.out.push(')');
    }

    fn visit_error(&mut self, message: Name, _span: Span) {
        self.out.push_str("<parse error: ");
        self.out.push_str(self.interner.lookup(message));
        self.out.push('>');
    }
}

/// Source text for the tree rooted at `id`.
pub fn deparse(arena: &ExprArena, interner: &StringInterner, id: ExprId) -> String {
    let mut deparser = Deparser::new(arena, interner);
    deparser.visit_expr(id);
    deparser.finish()
}
