//! Token definitions

use crate::keyword::Keyword;
use logos::{Lexer, Logos};

/// Prim token
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\n\r]+")]
#[logos(skip r";[^\n]*")]
pub enum Token {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,

    // Special-form heads
    #[token("lambda")]
    Lambda,
    #[token("if")]
    If,

    /// String literal with escapes resolved
    #[regex(r#""([^"\\]|\\.)*""#, unescape)]
    StringLit(String),

    /// Any other run of non-delimiter characters: numbers and symbols
    #[regex(r#"[^ \t\n\r()";]+"#, |lex| lex.slice().to_string())]
    Atom(String),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Lambda => write!(f, "{}", Keyword::Lambda),
            Token::If => write!(f, "{}", Keyword::If),
            Token::StringLit(s) => write!(f, "{s:?}"),
            Token::Atom(a) => write!(f, "{a}"),
        }
    }
}

fn unescape(lex: &mut Lexer<Token>) -> Option<String> {
    let slice = lex.slice();
    let inner = &slice[1..slice.len() - 1];
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            '"' => out.push('"'),
            '\\' => out.push('\\'),
            // unknown escape: reject the literal
            _ => return None,
        }
    }
    Some(out)
}
