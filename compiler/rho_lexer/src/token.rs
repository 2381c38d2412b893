//! Cooked tokens.

use std::fmt;

use rho_ir::{Name, Span};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Literals
    Number(f64),
    Str(Name),
    Ident(Name),
    True,
    False,
    Null,

    // Keywords
    Function,
    Backslash,
    If,
    Else,
    Dots,

    // Assignment
    LeftAssign,
    SuperAssign,
    RightAssign,
    RightSuperAssign,
    Equals,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    EqEq,
    NotEq,
    Lt,
    Gt,
    LtEq,
    GtEq,
    Bang,
    Amp,
    AmpAmp,
    Pipe,
    PipePipe,
    Colon,
    Dollar,
    /// `%%`, `%/%`, `%in%`, ...
    Special(Name),

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    DoubleLBracket,
    RBracket,
    Comma,
    Semicolon,
    Newline,

    /// Unrecognized input. The matching [`LexError`](crate::LexError) is in
    /// the token list.
    Error,
    Eof,
}

impl TokenKind {
    /// Name of the function an operator token calls.
    pub fn operator_name(self) -> Option<&'static str> {
        Some(match self {
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Caret => "^",
            TokenKind::EqEq => "==",
            TokenKind::NotEq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::LtEq => "<=",
            TokenKind::GtEq => ">=",
            TokenKind::Bang => "!",
            TokenKind::Amp => "&",
            TokenKind::AmpAmp => "&&",
            TokenKind::Pipe => "|",
            TokenKind::PipePipe => "||",
            _ => return None,
        })
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(op) = self.operator_name() {
            return write!(f, "'{op}'");
        }
        let text = match self {
            TokenKind::Number(_) => "numeric constant",
            TokenKind::Str(_) => "string constant",
            TokenKind::Ident(_) => "symbol",
            TokenKind::True | TokenKind::False => "logical constant",
            TokenKind::Null => "NULL",
            TokenKind::Function => "'function'",
            TokenKind::Backslash => "'\\'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::Dots => "'...'",
            TokenKind::LeftAssign => "'<-'",
            TokenKind::SuperAssign => "'<<-'",
            TokenKind::RightAssign => "'->'",
            TokenKind::RightSuperAssign => "'->>'",
            TokenKind::Equals => "'='",
            TokenKind::Colon => "':'",
            TokenKind::Dollar => "'$'",
            TokenKind::Special(_) => "SPECIAL",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LBracket => "'['",
            TokenKind::DoubleLBracket => "'[['",
            TokenKind::RBracket => "']'",
            TokenKind::Comma => "','",
            TokenKind::Semicolon => "';'",
            TokenKind::Newline => "end of line",
            TokenKind::Error => "invalid token",
            TokenKind::Eof => "end of input",
            _ => "operator",
        };
        f.write_str(text)
    }
}
