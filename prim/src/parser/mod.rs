//! Parser implementation using lalrpop
//!
//! Grammar (one expression per source):
//!
//! ```text
//! expr   := atom | string | list
//! list   := "(" "lambda" "(" symbol* ")" expr ")"
//!         | "(" "if" (expr expr)+ expr ")"
//!         | "(" expr expr* ")"
//! ```

use crate::ast::{Expr, Lambda, Span, Spanned};
use crate::error::{CompileError, Result};
use crate::lexer::Token;
use lalrpop_util::ParseError;
use std::collections::HashSet;
use std::rc::Rc;


lalrpop_util::lalrpop_mod!(
    #[allow(clippy::all)]
    grammar,
    "/parser/grammar.rs"
);

/// Parse tokens into a single root expression
pub fn parse(_filename: &str, source: &str, tokens: Vec<(Token, Span)>) -> Result<Spanned<Expr>> {
    let unclosed = innermost_unclosed(&tokens);
    let token_iter = tokens
        .into_iter()
        .map(|(tok, span)| (span.start, tok, span.end));

    grammar::ExprParser::new()
        .parse(token_iter)
        .map_err(|e| match e {
            ParseError::User { error } => error,
            ParseError::InvalidToken { location } => {
                CompileError::parser("invalid token", Span::new(location, location + 1))
            }
            ParseError::UnrecognizedEof { location, .. } => match unclosed {
                Some(open) => CompileError::parser("unclosed `(`", open),
                None => CompileError::parser(
                    "expected an expression",
                    Span::new(location, source.len()),
                ),
            },
            ParseError::UnrecognizedToken { token, .. } => CompileError::parser(
                format!("unexpected `{}`", token.1),
                Span::new(token.0, token.2),
            ),
            ParseError::ExtraToken { token } => CompileError::parser(
                format!("unexpected `{}` after expression", token.1),
                Span::new(token.0, token.2),
            ),
        })
}

/// Span of the last `(` left open at end of input
fn innermost_unclosed(tokens: &[(Token, Span)]) -> Option<Span> {
    let mut open = Vec::new();
    for (tok, span) in tokens {
        match tok {
            Token::LParen => open.push(*span),
            Token::RParen => {
                open.pop();
            }
            _ => {}
        }
    }
    open.pop()
}

/// Classify an atom as a number literal or a symbol
fn atom(text: &str, span: Span) -> Result<Spanned<Expr>> {
    if !looks_numeric(text) {
        return Ok(Spanned::new(Expr::Symbol(text.to_string()), span));
    }
    if let Ok(n) = text.parse::<i64>() {
        Ok(Spanned::new(Expr::IntLit(n), span))
    } else if let Ok(x) = text.parse::<f64>() {
        Ok(Spanned::new(Expr::FloatLit(x), span))
    } else {
        Err(CompileError::parser(
            format!("malformed number literal `{text}`"),
            span,
        ))
    }
}

/// Digit first, or a sign followed by a digit
fn looks_numeric(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('+' | '-') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

fn parameter(name: String, span: Span) -> Result<Spanned<String>> {
    if looks_numeric(&name) {
        return Err(CompileError::parser("lambda parameter must be a symbol", span));
    }
    Ok(Spanned::new(name, span))
}

fn lambda(
    params: Vec<Spanned<String>>,
    mut body: Vec<Spanned<Expr>>,
    span: Span,
) -> Result<Spanned<Expr>> {
    let mut seen = HashSet::new();
    for param in &params {
        if !seen.insert(param.node.as_str()) {
            return Err(CompileError::parser(
                format!("duplicate parameter `{}`", param.node),
                param.span,
            ));
        }
    }

    if body.len() != 1 {
        return Err(CompileError::parser(
            format!("lambda takes exactly one body expression, found {}", body.len()),
            span,
        ));
    }
    let body = body.remove(0);
    Ok(Spanned::new(Expr::Lambda(Rc::new(Lambda { params, body })), span))
}

fn if_form(mut forms: Vec<Spanned<Expr>>, span: Span) -> Result<Spanned<Expr>> {
    if forms.len() < 3 || forms.len() % 2 == 0 {
        return Err(CompileError::parser(
            "`if` needs condition/consequent pairs followed by an alternative",
            span,
        ));
    }

    let alternative = Box::new(forms.pop().ok_or_else(|| {
        CompileError::parser("`if` is missing its alternative", span)
    })?);
    let mut conditions = Vec::with_capacity(forms.len() / 2);
    let mut consequents = Vec::with_capacity(forms.len() / 2);
    let mut pairs = forms.into_iter();
    while let (Some(cond), Some(then)) = (pairs.next(), pairs.next()) {
        conditions.push(cond);
        consequents.push(then);
    }

    Ok(Spanned::new(
        Expr::If {
            conditions,
            consequents,
            alternative,
        },
        span,
    ))
}
