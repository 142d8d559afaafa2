//! Decoding externally produced trees
//!
//! A producer outside this crate can hand over a tree as JSON in the serde
//! encoding of [`Spanned<Expr>`]. Node tags are checked before decoding so
//! an unknown node kind is reported as such rather than as a shape error.

use super::error::{InterpResult, RuntimeError};
use crate::ast::{Expr, Spanned};
use serde::Deserialize;
use serde_json::Value as Json;
use std::collections::HashSet;

/// Node tags the evaluator has rules for
const EXPR_TAGS: &[&str] = &[
    "IntLit",
    "FloatLit",
    "StringLit",
    "Symbol",
    "Lambda",
    "If",
    "Call",
];

/// Decode a JSON-encoded expression tree
pub fn load_ast(text: &str) -> InterpResult<Spanned<Expr>> {
    let json = read_json(text).map_err(RuntimeError::malformed_ast)?;
    if let Some(tag) = find_unsupported(&json) {
        return Err(RuntimeError::unsupported_expression(&tag));
    }
    let expr = Spanned::<Expr>::deserialize(serde_stacker::Deserializer::new(json))
        .map_err(RuntimeError::malformed_ast)?;
    check_params(&expr)?;
    Ok(expr)
}

/// Parse without serde_json's nesting limit, growing the stack as needed.
///
/// Every tree level costs three JSON levels, so the default limit would cap
/// loadable trees far below the evaluator's own depth limit.
fn read_json(text: &str) -> serde_json::Result<Json> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let json = Json::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(json)
}

/// First expression tag outside [`EXPR_TAGS`], searching depth-first.
///
/// Expression nodes are the objects `{"node": {<Tag>: ...}, ...}`, or
/// `{"node": "<Tag>"}` for a tag without payload. Parameter names also sit
/// under `node` as plain strings, so objects inside a `params` array are
/// exempt from the string form.
fn find_unsupported(json: &Json) -> Option<String> {
    let mut stack = vec![(json, false)];
    while let Some((value, is_param)) = stack.pop() {
        match value {
            Json::Object(map) => {
                match map.get("node") {
                    Some(Json::Object(node)) if node.len() == 1 => {
                        if let Some(tag) = node.keys().next()
                            && !EXPR_TAGS.contains(&tag.as_str())
                        {
                            return Some(tag.clone());
                        }
                    }
                    Some(Json::String(tag)) if !is_param && !EXPR_TAGS.contains(&tag.as_str()) => {
                        return Some(tag.clone());
                    }
                    _ => {}
                }
                for (key, child) in map.iter().rev() {
                    match (key.as_str(), child) {
                        ("params", Json::Array(params)) => {
                            stack.extend(params.iter().rev().map(|p| (p, true)));
                        }
                        _ => stack.push((child, false)),
                    }
                }
            }
            Json::Array(items) => stack.extend(items.iter().rev().map(|item| (item, false))),
            _ => {}
        }
    }
    None
}

/// Reject lambdas that name a parameter twice; a call frame needs one
/// binding per parameter.
fn check_params(root: &Spanned<Expr>) -> InterpResult<()> {
    let mut stack = vec![root];
    while let Some(expr) = stack.pop() {
        match &expr.node {
            Expr::IntLit(_) | Expr::FloatLit(_) | Expr::StringLit(_) | Expr::Symbol(_) => {}
            Expr::Lambda(lambda) => {
                let mut seen = HashSet::new();
                for param in &lambda.params {
                    if !seen.insert(param.node.as_str()) {
                        return Err(RuntimeError::malformed_ast(format!(
                            "duplicate parameter `{}`",
                            param.node
                        ))
                        .with_span(param.span));
                    }
                }
                stack.push(&lambda.body);
            }
            Expr::If {
                conditions,
                consequents,
                alternative,
            } => {
                stack.extend(conditions);
                stack.extend(consequents);
                stack.push(alternative.as_ref());
            }
            Expr::Call { operator, args } => {
                stack.push(operator.as_ref());
                stack.extend(args);
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interp::ErrorKind;

    #[test]
    fn test_load_call() {
        let expr = load_ast(
            r#"{"node": {"Call": {
                "operator": {"node": {"Symbol": "+"}},
                "args": [{"node": {"IntLit": 1}}, {"node": {"FloatLit": 2.5}}]
            }}}"#,
        )
        .unwrap();
        assert_eq!(
            expr,
            Expr::call(Expr::symbol("+"), vec![Expr::int(1), Expr::float(2.5)])
        );
    }

    #[test]
    fn test_load_lambda_keeps_spans() {
        let expr = load_ast(
            r#"{"node": {"Lambda": {
                "params": [{"node": "x", "span": {"start": 9, "end": 10}}],
                "body": {"node": {"Symbol": "x"}, "span": {"start": 12, "end": 13}}
            }}, "span": {"start": 0, "end": 14}}"#,
        )
        .unwrap();
        assert_eq!(expr.span.end, 14);
        let Expr::Lambda(lambda) = expr.node else {
            panic!("expected lambda");
        };
        assert_eq!(lambda.params[0].span.start, 9);
    }

    #[test]
    fn test_unknown_tag_is_unsupported() {
        let err = load_ast(
            r#"{"node": {"Call": {
                "operator": {"node": {"Symbol": "f"}},
                "args": [{"node": {"Quote": "x"}}]
            }}}"#,
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedExpression("Quote".to_string()));
    }

    #[test]
    fn test_unknown_unit_tag_is_unsupported() {
        let err = load_ast(
            r#"{"node": {"Call": {
                "operator": {"node": {"Symbol": "f"}},
                "args": [{"node": "Nil"}]
            }}}"#,
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UnsupportedExpression("Nil".to_string()));
    }

    #[test]
    fn test_param_names_are_not_tags() {
        let expr = load_ast(
            r#"{"node": {"Lambda": {
                "params": [{"node": "Nil"}],
                "body": {"node": {"Symbol": "Nil"}}
            }}}"#,
        )
        .unwrap();
        assert!(matches!(expr.node, Expr::Lambda(_)));
    }

    #[test]
    fn test_duplicate_params_are_malformed() {
        let err = load_ast(
            r#"{"node": {"Lambda": {
                "params": [{"node": "x"}, {"node": "x", "span": {"start": 11, "end": 12}}],
                "body": {"node": {"Symbol": "x"}}
            }}}"#,
        )
        .unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedAst);
        assert!(err.message.contains("duplicate parameter `x`"));
        assert_eq!(err.span, Some(crate::ast::Span::new(11, 12)));
    }

    #[test]
    fn test_nested_duplicate_params_are_malformed() {
        let inner = Expr::lambda(&["a", "a"], Expr::symbol("a"));
        let branch = Expr::if_else(vec![(Expr::symbol("true"), inner)], Expr::int(0));
        let outer = Expr::call(Expr::symbol("f"), vec![branch]);
        let text = serde_json::to_string(&outer).unwrap();
        assert_eq!(load_ast(&text).unwrap_err().kind, ErrorKind::MalformedAst);
    }

    #[test]
    fn test_load_deep_tree() {
        // (+ (+ ... (+ 0 1) ... 1) 1), 300 calls deep
        let mut expr = Expr::int(0);
        for _ in 0..300 {
            expr = Expr::call(Expr::symbol("+"), vec![expr, Expr::int(1)]);
        }
        let text = serde_json::to_string(&expr).unwrap();
        let loaded = load_ast(&text).unwrap();
        assert_eq!(loaded, expr);
        assert_eq!(
            crate::interp::eval(&loaded).unwrap(),
            crate::interp::Value::Int(300)
        );
    }

    #[test]
    fn test_trailing_input_is_malformed() {
        let err = load_ast(r#"{"node": {"IntLit": 1}} 2"#).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedAst);
    }

    #[test]
    fn test_bad_json_is_malformed() {
        let err = load_ast("{").unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedAst);
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let err = load_ast(r#"{"node": {"IntLit": "seven"}}"#).unwrap_err();
        assert_eq!(err.kind, ErrorKind::MalformedAst);
    }
}
