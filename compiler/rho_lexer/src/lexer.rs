//! Scanner: logos raw tokens, then interning and spans.

use logos::Logos;
use rho_ir::{Span, StringInterner};

use super::escape::unescape;
use super::line_index::LineIndex;
use super::{Token, TokenKind};

#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\f]+")]
#[logos(skip r"#[^\n]*")]
enum RawToken {
    #[token("\n")]
    Newline,

    // === Keywords ===
    #[token("function")]
    Function,
    #[token("\\")]
    Backslash,
    #[token("if")]
    If,
    #[token("else")]
    Else,
    #[token("TRUE")]
    True,
    #[token("FALSE")]
    False,
    #[token("NULL")]
    Null,
    #[token("Inf")]
    Inf,
    #[token("NaN")]
    NaN,
    #[token("...", priority = 10)]
    Dots,

    // === Assignment ===
    #[token("<-")]
    LeftAssign,
    #[token("<<-")]
    SuperAssign,
    #[token("->")]
    RightAssign,
    #[token("->>")]
    RightSuperAssign,
    #[token("=")]
    Equals,

    // === Operators ===
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,
    #[token("==")]
    EqEq,
    #[token("!=")]
    NotEq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("!")]
    Bang,
    #[token("&")]
    Amp,
    #[token("&&")]
    AmpAmp,
    #[token("|")]
    Pipe,
    #[token("||")]
    PipePipe,
    #[token(":")]
    Colon,
    #[token("$")]
    Dollar,
    #[regex(r"%[^%\n]*%")]
    Special,

    // === Delimiters ===
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("[")]
    LBracket,
    #[token("[[")]
    DoubleLBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(";")]
    Semicolon,

    // === Literals ===
    #[regex(r"[0-9]+(\.[0-9]*)?([eE][+-]?[0-9]+)?L?", decimal)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?L?", decimal)]
    #[regex(r"0[xX][0-9a-fA-F]+L?", hexadecimal)]
    Number(f64),

    #[regex(r#""([^"\\]|\\(.|\n))*""#)]
    #[regex(r#"'([^'\\]|\\(.|\n))*'"#)]
    Str,

    #[regex(r#""([^"\\]|\\(.|\n))*"#)]
    #[regex(r#"'([^'\\]|\\(.|\n))*"#)]
    UnterminatedStr,

    #[regex(r"[a-zA-Z][a-zA-Z0-9._]*")]
    #[regex(r"\.([a-zA-Z._][a-zA-Z0-9._]*)?")]
    Ident,

    #[regex(r"`[^`\n]*`")]
    QuotedIdent,
}

fn decimal(lex: &mut logos::Lexer<'_, RawToken>) -> Option<f64> {
    lex.slice().trim_end_matches('L').parse().ok()
}

fn hexadecimal(lex: &mut logos::Lexer<'_, RawToken>) -> f64 {
    lex.slice()[2..]
        .trim_end_matches('L')
        .chars()
        .filter_map(|c| c.to_digit(16))
        .fold(0.0, |acc, digit| acc * 16.0 + f64::from(digit))
}

/// A problem found while scanning.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum LexError {
    #[error("unexpected input '{text}'")]
    UnexpectedInput { text: String, span: Span },
    #[error("unterminated string constant")]
    UnterminatedString { span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnexpectedInput { span, .. } | LexError::UnterminatedString { span } => *span,
        }
    }
}

/// Scanner output. Always ends with an `Eof` token.
#[derive(Clone, Debug, Default)]
pub struct TokenList {
    pub tokens: Vec<Token>,
    pub errors: Vec<LexError>,
}

/// Scan `source`, interning identifiers and string contents.
pub fn lex(source: &str, interner: &StringInterner) -> TokenList {
    let index = LineIndex::new(source);
    let mut out = TokenList::default();
    let mut raw = RawToken::lexer(source);

    while let Some(result) = raw.next() {
        let span = index.span(raw.span());
        let slice = raw.slice();
        let kind = match result {
            Ok(token) => match cook(token, slice, interner) {
                Some(kind) => kind,
                None => {
                    out.errors.push(LexError::UnterminatedString { span });
                    TokenKind::Error
                }
            },
            Err(()) => {
                out.errors.push(LexError::UnexpectedInput {
                    text: slice.to_owned(),
                    span,
                });
                TokenKind::Error
            }
        };
        out.tokens.push(Token::new(kind, span));
    }

    let end = index.position(source.len());
    out.tokens.push(Token::new(TokenKind::Eof, Span::new(end, end)));
    out
}

/// `None` for unterminated strings.
fn cook(token: RawToken, slice: &str, interner: &StringInterner) -> Option<TokenKind> {
    Some(match token {
        RawToken::Newline => TokenKind::Newline,
        RawToken::Function => TokenKind::Function,
        RawToken::Backslash => TokenKind::Backslash,
        RawToken::If => TokenKind::If,
        RawToken::Else => TokenKind::Else,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Null => TokenKind::Null,
        RawToken::Inf => TokenKind::Number(f64::INFINITY),
        RawToken::NaN => TokenKind::Number(f64::NAN),
        RawToken::Dots => TokenKind::Dots,
        RawToken::LeftAssign => TokenKind::LeftAssign,
        RawToken::SuperAssign => TokenKind::SuperAssign,
        RawToken::RightAssign => TokenKind::RightAssign,
        RawToken::RightSuperAssign => TokenKind::RightSuperAssign,
        RawToken::Equals => TokenKind::Equals,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::Slash => TokenKind::Slash,
        RawToken::Caret => TokenKind::Caret,
        RawToken::EqEq => TokenKind::EqEq,
        RawToken::NotEq => TokenKind::NotEq,
        RawToken::Lt => TokenKind::Lt,
        RawToken::Gt => TokenKind::Gt,
        RawToken::LtEq => TokenKind::LtEq,
        RawToken::GtEq => TokenKind::GtEq,
        RawToken::Bang => TokenKind::Bang,
        RawToken::Amp => TokenKind::Amp,
        RawToken::AmpAmp => TokenKind::AmpAmp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::PipePipe => TokenKind::PipePipe,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Dollar => TokenKind::Dollar,
        RawToken::Special => TokenKind::Special(interner.intern(slice)),
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::DoubleLBracket => TokenKind::DoubleLBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Number(value) => TokenKind::Number(value),
        RawToken::Str => TokenKind::Str(interner.intern(&unescape(slice))),
        RawToken::UnterminatedStr => return None,
        RawToken::Ident => TokenKind::Ident(interner.intern(slice)),
        RawToken::QuotedIdent => {
            TokenKind::Ident(interner.intern(&slice[1..slice.len() - 1]))
        }
    })
}

#[cfg(test)]
mod tests;
