//! Lexer implementation using logos

mod token;

pub use token::Token;

use crate::ast::Span;
use crate::error::{CompileError, Result};
use logos::Logos;

/// Tokenize source code
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer(source);

    while let Some(result) = lexer.next() {
        let span = Span::new(lexer.span().start, lexer.span().end);
        match result {
            Ok(token) => tokens.push((token, span)),
            Err(_) => {
                return Err(CompileError::lexer(
                    format!("unexpected input: {:?}", lexer.slice()),
                    span,
                ));
            }
        }
    }

    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<Token> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|(t, _)| t)
            .collect()
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").unwrap().is_empty());
    }

    #[test]
    fn test_tokenize_list() {
        assert_eq!(
            kinds("(+ 1 2.5)"),
            vec![
                Token::LParen,
                Token::Atom("+".to_string()),
                Token::Atom("1".to_string()),
                Token::Atom("2.5".to_string()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_tokenize_operators_are_atoms() {
        assert_eq!(
            kinds("<= >= ++ not"),
            vec![
                Token::Atom("<=".to_string()),
                Token::Atom(">=".to_string()),
                Token::Atom("++".to_string()),
                Token::Atom("not".to_string()),
            ]
        );
    }

    #[test]
    fn test_tokenize_special_form_heads() {
        assert_eq!(
            kinds("(lambda if lambdas iffy)"),
            vec![
                Token::LParen,
                Token::Lambda,
                Token::If,
                Token::Atom("lambdas".to_string()),
                Token::Atom("iffy".to_string()),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_tokenize_string_escapes() {
        assert_eq!(
            kinds(r#""a\"b\n""#),
            vec![Token::StringLit("a\"b\n".to_string())]
        );
    }

    #[test]
    fn test_tokenize_string_adjacent_to_paren() {
        assert_eq!(
            kinds(r#"("x")"#),
            vec![
                Token::LParen,
                Token::StringLit("x".to_string()),
                Token::RParen
            ]
        );
    }

    #[test]
    fn test_tokenize_skips_comments() {
        assert_eq!(
            kinds("1 ; the rest is ignored\n2"),
            vec![Token::Atom("1".to_string()), Token::Atom("2".to_string())]
        );
    }

    #[test]
    fn test_tokenize_spans() {
        let tokens = tokenize("(f x)").unwrap();
        assert_eq!(tokens[0].1, Span::new(0, 1));
        assert_eq!(tokens[1].1, Span::new(1, 2));
        assert_eq!(tokens[2].1, Span::new(3, 4));
        assert_eq!(tokens[3].1, Span::new(4, 5));
    }

    #[test]
    fn test_unterminated_string_is_error() {
        let err = tokenize(r#"(f "abc)"#).unwrap_err();
        assert!(matches!(err, CompileError::Lexer { .. }));
    }

    #[test]
    fn test_unknown_escape_is_error() {
        assert!(tokenize(r#""\q""#).is_err());
    }
}
