//! Runtime errors for the interpreter

use super::Value;
use crate::ast::Span;
use thiserror::Error;

/// Runtime error during interpretation
#[derive(Debug, Clone, Error)]
#[error("Runtime error: {message}")]
pub struct RuntimeError {
    pub kind: ErrorKind,
    pub message: String,
    /// Innermost node the failure was raised under, when known
    pub span: Option<Span>,
}

/// Kinds of runtime errors
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// Symbol bound nowhere in the frame chain
    UndefinedIdentifier(String),
    /// AST node the evaluator has no rule for
    UnsupportedExpression(String),
    /// Operator position evaluated to a non-callable value
    NotCallable(Value),
    /// Wrong argument count for a builtin or closure
    ArityMismatch { expected: usize, actual: usize },
    /// Builtin operand of the wrong kind
    TypeMismatch { expected: &'static str, actual: Value },
    /// Evaluation nested deeper than the configured limit
    StackOverflow,
    /// Input tree could not be decoded
    MalformedAst,
}

impl RuntimeError {
    fn new(kind: ErrorKind, message: String) -> Self {
        RuntimeError {
            kind,
            message,
            span: None,
        }
    }

    pub fn undefined_identifier(name: &str) -> Self {
        Self::new(
            ErrorKind::UndefinedIdentifier(name.to_string()),
            format!("undefined identifier: {name}"),
        )
    }

    /// Same as [`undefined_identifier`](Self::undefined_identifier) with a
    /// "did you mean" hint appended
    pub fn undefined_identifier_with_hint(name: &str, suggestion: Option<&str>) -> Self {
        let mut err = Self::undefined_identifier(name);
        if let Some(s) = suggestion {
            err.message.push_str(&format!(" (did you mean `{s}`?)"));
        }
        err
    }

    pub fn unsupported_expression(what: &str) -> Self {
        Self::new(
            ErrorKind::UnsupportedExpression(what.to_string()),
            format!("unsupported expression: {what}"),
        )
    }

    pub fn not_callable(value: Value) -> Self {
        let message = format!("{} is not callable: {value}", value.type_name());
        Self::new(ErrorKind::NotCallable(value), message)
    }

    pub fn arity_mismatch(callee: &str, expected: usize, actual: usize) -> Self {
        Self::new(
            ErrorKind::ArityMismatch { expected, actual },
            format!("{callee} expects {expected} argument(s), got {actual}"),
        )
    }

    pub fn type_mismatch(callee: &str, expected: &'static str, actual: Value) -> Self {
        let message = format!(
            "{callee} expects {expected} operands, got {} {actual}",
            actual.type_name()
        );
        Self::new(ErrorKind::TypeMismatch { expected, actual }, message)
    }

    pub fn stack_overflow(limit: usize) -> Self {
        Self::new(
            ErrorKind::StackOverflow,
            format!("stack overflow: evaluation nested deeper than {limit}"),
        )
    }

    pub fn malformed_ast(detail: impl std::fmt::Display) -> Self {
        Self::new(ErrorKind::MalformedAst, format!("malformed AST: {detail}"))
    }

    /// Attach a location unless one is already set.
    ///
    /// Empty spans come from synthesized nodes and are skipped, so an outer
    /// node with a real location can still claim the error.
    pub fn with_span(mut self, span: Span) -> Self {
        if self.span.is_none() && !span.is_empty() {
            self.span = Some(span);
        }
        self
    }
}

/// Result type for interpreter operations
pub type InterpResult<T> = Result<T, RuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined_identifier() {
        let err = RuntimeError::undefined_identifier("foo");
        assert_eq!(err.kind, ErrorKind::UndefinedIdentifier("foo".to_string()));
        assert_eq!(err.message, "undefined identifier: foo");
    }

    #[test]
    fn test_undefined_identifier_hint() {
        let err = RuntimeError::undefined_identifier_with_hint("lenght", Some("length"));
        assert_eq!(err.kind, ErrorKind::UndefinedIdentifier("lenght".to_string()));
        assert_eq!(err.message, "undefined identifier: lenght (did you mean `length`?)");
        let err = RuntimeError::undefined_identifier_with_hint("q", None);
        assert_eq!(err.message, "undefined identifier: q");
    }

    #[test]
    fn test_not_callable_carries_value() {
        let err = RuntimeError::not_callable(Value::Int(3));
        assert_eq!(err.kind, ErrorKind::NotCallable(Value::Int(3)));
        assert_eq!(err.message, "int is not callable: 3");
    }

    #[test]
    fn test_arity_mismatch_message_format() {
        let err = RuntimeError::arity_mismatch("not", 1, 2);
        assert_eq!(
            err.kind,
            ErrorKind::ArityMismatch {
                expected: 1,
                actual: 2
            }
        );
        assert_eq!(err.message, "not expects 1 argument(s), got 2");
    }

    #[test]
    fn test_type_mismatch_message_format() {
        let err = RuntimeError::type_mismatch("+", "number", Value::string("a"));
        assert_eq!(err.message, r#"+ expects number operands, got string "a""#);
    }

    #[test]
    fn test_display() {
        let err = RuntimeError::stack_overflow(10);
        assert_eq!(
            err.to_string(),
            "Runtime error: stack overflow: evaluation nested deeper than 10"
        );
    }

    #[test]
    fn test_with_span_keeps_innermost() {
        let err = RuntimeError::undefined_identifier("x")
            .with_span(Span::new(4, 5))
            .with_span(Span::new(0, 10));
        assert_eq!(err.span, Some(Span::new(4, 5)));
    }

    #[test]
    fn test_with_span_skips_empty() {
        let err = RuntimeError::undefined_identifier("x")
            .with_span(Span::default())
            .with_span(Span::new(0, 10));
        assert_eq!(err.span, Some(Span::new(0, 10)));
    }

    #[test]
    fn test_error_is_std_error() {
        let err = RuntimeError::malformed_ast("eof");
        let std_err: &dyn std::error::Error = &err;
        assert!(std_err.source().is_none());
        assert_eq!(err.message, "malformed AST: eof");
    }
}
