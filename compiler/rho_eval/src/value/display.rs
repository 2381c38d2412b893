//! Console rendering of values.

use rho_ir::{deparse, StringInterner};
use rho_vector::render;

use super::{ListItem, Value};

impl Value {
    /// Render as the console prints it. No trailing newline.
    pub fn display(&self, interner: &StringInterner) -> String {
        let mut out = String::new();
        write_value(self, interner, "", &mut out);
        out
    }
}

fn write_value(value: &Value, interner: &StringInterner, prefix: &str, out: &mut String) {
    match value {
        Value::Vector(v) => out.push_str(&render(v)),
        Value::List(items) => write_list(items, interner, prefix, out),
        Value::Closure(c) => out.push_str(&deparse(&c.arena, interner, c.def)),
        Value::Builtin(b) => {
            out.push_str("<builtin: ");
            out.push_str(interner.lookup(b.name));
            out.push('>');
        }
        Value::Promise(p) => match p.value() {
            Some(forced) => write_value(&forced, interner, prefix, out),
            None => out.push_str("<promise>"),
        },
        Value::Missing => out.push_str("<missing>"),
        Value::Null => out.push_str("NULL"),
        Value::Error(e) => {
            out.push_str("Error: ");
            out.push_str(&e.message);
        }
        Value::Package(p) => {
            out.push_str("<package: ");
            out.push_str(&p.name);
            out.push('>');
        }
        Value::Env(env) => match env.name() {
            Some(name) => {
                out.push_str("<environment: ");
                out.push_str(&name);
                out.push('>');
            }
            None => out.push_str("<environment>"),
        },
        Value::Lang(lang) => out.push_str(&deparse(&lang.arena, interner, lang.expr)),
    }
}

/// `[[1]]` / `$name` headers, each followed by the element and a blank line.
fn write_list(items: &[ListItem], interner: &StringInterner, prefix: &str, out: &mut String) {
    if items.is_empty() {
        out.push_str("list()");
        return;
    }
    for (i, (name, item)) in items.iter().enumerate() {
        let header = match name {
            Some(name) if !interner.lookup(*name).is_empty() => {
                format!("{prefix}${}", interner.lookup(*name))
            }
            _ => format!("{prefix}[[{}]]", i + 1),
        };
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&header);
        out.push('\n');
        write_value(item, interner, &header, out);
        out.push('\n');
    }
}

/// Short form of an actual argument for error messages: `4`, `y = 2`.
pub(crate) fn describe_actual(item: &ListItem, interner: &StringInterner) -> String {
    let (name, value) = item;
    let shown = match value {
        Value::Vector(v) if v.len() == 1 => match v.kind() {
            rho_vector::VectorKind::Character => format!("{:?}", v.as_strings()[0]),
            _ => v.as_strings().swap_remove(0),
        },
        Value::Vector(v) => format!("c({})", v.as_strings().join(", ")),
        Value::Null => "NULL".to_owned(),
        Value::Lang(lang) => deparse(&lang.arena, interner, lang.expr),
        other => format!("<{}>", other.type_name()),
    };
    match name {
        Some(name) => format!("{} = {shown}", interner.lookup(*name)),
        None => shown,
    }
}
