//! Parser tests. Trees are rendered as s-expressions so precedence is visible.

mod recovery_tests;

use rho_ir::{format_number, ExprArena, ExprId, ExprKind, StringInterner};

use crate::{parse, ParseOutput};

fn tree(arena: &ExprArena, interner: &StringInterner, id: ExprId) -> String {
    let sub = |id| tree(arena, interner, id);
    match arena.get_expr(id).kind {
        ExprKind::Number(value) => {
            let mut out = String::new();
            format_number(value, &mut out);
            out
        }
        ExprKind::Str(value) => format!("{:?}", interner.lookup(value)),
        ExprKind::Bool(value) => if value { "TRUE" } else { "FALSE" }.to_owned(),
        ExprKind::Null => "NULL".to_owned(),
        ExprKind::Missing => "<missing>".to_owned(),
        ExprKind::Ident(name) => interner.lookup(name).to_owned(),
        ExprKind::Dots => "...".to_owned(),
        ExprKind::Assign { target, value } => format!("(<- {} {})", sub(target), sub(value)),
        ExprKind::AssignInherited { target, value } => {
            format!("(<<- {} {})", sub(target), sub(value))
        }
        ExprKind::Function { params, body } => {
            let params: Vec<String> = arena
                .get_params(params)
                .iter()
                .map(|p| match p.default {
                    Some(default) => format!("{}={}", interner.lookup(p.name), sub(default)),
                    None => interner.lookup(p.name).to_owned(),
                })
                .collect();
            format!("(function ({}) {})", params.join(" "), sub(body))
        }
        ExprKind::Call { func, args } => {
            let mut out = format!("({}", sub(func));
            for arg in arena.get_args(args) {
                out.push(' ');
                if let Some(name) = arg.name {
                    out.push_str(interner.lookup(name));
                    out.push('=');
                }
                out.push_str(&sub(arg.value));
            }
            out.push(')');
            out
        }
        ExprKind::Block(list) => {
            let items: Vec<String> = arena.get_expr_list(list).iter().map(|&e| sub(e)).collect();
            format!("({{ {})", items.join(" "))
        }
        ExprKind::Range { from, to } => format!("(: {} {})", sub(from), sub(to)),
        ExprKind::Library(name) => format!("(library {})", interner.lookup(name)),
        ExprKind::Paren(inner) => format!("(paren {})", sub(inner)),
        ExprKind::If { cond, then, else_ } => match else_ {
            Some(else_) => format!("(if {} {} {})", sub(cond), sub(then), sub(else_)),
            None => format!("(if {} {})", sub(cond), sub(then)),
        },
        ExprKind::Quote(inner) => format!("(quote {})", sub(inner)),
        ExprKind::Error(message) => format!("(error {})", interner.lookup(message)),
    }
}

fn parse_trees(source: &str) -> (Vec<String>, ParseOutput) {
    let interner = StringInterner::new();
    let output = parse(source, &interner);
    let trees = output
        .exprs
        .iter()
        .map(|&id| tree(&output.arena, &interner, id))
        .collect();
    (trees, output)
}

/// Parse, asserting there were no errors.
fn trees(source: &str) -> Vec<String> {
    let (trees, output) = parse_trees(source);
    assert!(output.errors.is_empty(), "errors: {:?}", output.errors);
    trees
}

fn single(source: &str) -> String {
    let mut all = trees(source);
    assert_eq!(all.len(), 1, "expected one statement in {source:?}: {all:?}");
    all.remove(0)
}
