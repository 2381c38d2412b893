use pretty_assertions::assert_eq;

use super::*;

fn kinds(source: &str) -> (Vec<TokenKind>, StringInterner) {
    let interner = StringInterner::new();
    let list = lex(source, &interner);
    assert!(list.errors.is_empty(), "unexpected errors: {:?}", list.errors);
    (list.tokens.into_iter().map(|t| t.kind).collect(), interner)
}

#[test]
fn assignment_and_arithmetic() {
    let (tokens, interner) = kinds("x <- 3 + 4");
    let x = interner.intern("x");
    assert_eq!(
        tokens,
        vec![
            TokenKind::Ident(x),
            TokenKind::LeftAssign,
            TokenKind::Number(3.0),
            TokenKind::Plus,
            TokenKind::Number(4.0),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn assignment_operators_are_maximal() {
    let (tokens, _) = kinds("<<- <- -> ->> = ==");
    assert_eq!(
        tokens,
        vec![
            TokenKind::SuperAssign,
            TokenKind::LeftAssign,
            TokenKind::RightAssign,
            TokenKind::RightSuperAssign,
            TokenKind::Equals,
            TokenKind::EqEq,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn number_forms() {
    let (tokens, _) = kinds("1 2.5 .5 1e3 5L 0x1F Inf");
    assert_eq!(
        tokens,
        vec![
            TokenKind::Number(1.0),
            TokenKind::Number(2.5),
            TokenKind::Number(0.5),
            TokenKind::Number(1000.0),
            TokenKind::Number(5.0),
            TokenKind::Number(31.0),
            TokenKind::Number(f64::INFINITY),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn dotted_names_and_dots() {
    let (tokens, interner) = kinds("as.POSIXct .hidden ...");
    assert_eq!(
        tokens,
        vec![
            TokenKind::Ident(interner.intern("as.POSIXct")),
            TokenKind::Ident(interner.intern(".hidden")),
            TokenKind::Dots,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn backtick_names_and_specials() {
    let (tokens, interner) = kinds("`names<-` %in% %%");
    assert_eq!(
        tokens,
        vec![
            TokenKind::Ident(interner.intern("names<-")),
            TokenKind::Special(interner.intern("%in%")),
            TokenKind::Special(interner.intern("%%")),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn strings_are_unescaped_and_interned() {
    let (tokens, interner) = kinds(r#""a\tb" 'c'"#);
    assert_eq!(
        tokens,
        vec![
            TokenKind::Str(interner.intern("a\tb")),
            TokenKind::Str(interner.intern("c")),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn comments_are_skipped_but_newlines_kept() {
    let (tokens, _) = kinds("1 # one\n2");
    assert_eq!(
        tokens,
        vec![
            TokenKind::Number(1.0),
            TokenKind::Newline,
            TokenKind::Number(2.0),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn double_bracket_is_one_token() {
    let (tokens, interner) = kinds("x[[1]]");
    assert_eq!(
        tokens,
        vec![
            TokenKind::Ident(interner.intern("x")),
            TokenKind::DoubleLBracket,
            TokenKind::Number(1.0),
            TokenKind::RBracket,
            TokenKind::RBracket,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn spans_carry_line_and_column() {
    let interner = StringInterner::new();
    let list = lex("a\n  bb", &interner);
    let bb = list.tokens[2];
    assert_eq!((bb.span.start.line, bb.span.start.col), (2, 3));
    assert_eq!((bb.span.end.line, bb.span.end.col), (2, 5));
}

#[test]
fn unexpected_input_is_reported() {
    let interner = StringInterner::new();
    let list = lex("1 ? 2", &interner);
    assert_eq!(list.tokens[1].kind, TokenKind::Error);
    assert!(matches!(
        &list.errors[..],
        [LexError::UnexpectedInput { text, .. }] if text == "?"
    ));
}

#[test]
fn unterminated_string_is_reported() {
    let interner = StringInterner::new();
    let list = lex("\"abc", &interner);
    assert!(matches!(
        &list.errors[..],
        [LexError::UnterminatedString { .. }]
    ));
}
