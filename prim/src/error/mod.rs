//! Front-end error types and diagnostic reporting

use crate::ast::Span;
use crate::interp::RuntimeError;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, CompileError>;

/// Lexer or parser failure
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("Lexer error at {span}: {message}")]
    Lexer { message: String, span: Span },

    #[error("Parser error at {span}: {message}")]
    Parser { message: String, span: Span },
}

impl CompileError {
    pub fn lexer(message: impl Into<String>, span: Span) -> Self {
        Self::Lexer {
            message: message.into(),
            span,
        }
    }

    pub fn parser(message: impl Into<String>, span: Span) -> Self {
        Self::Parser {
            message: message.into(),
            span,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::Lexer { span, .. } | Self::Parser { span, .. } => *span,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Lexer { message, .. } | Self::Parser { message, .. } => message,
        }
    }
}

/// Any failure on the way from source text to a value
#[derive(Debug, Error)]
pub enum PrimError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Runtime(#[from] RuntimeError),
}

impl PrimError {
    /// Render with ariadne against `source`
    pub fn report(&self, filename: &str, source: &str) {
        match self {
            PrimError::Compile(e) => report_error(filename, source, e),
            PrimError::Runtime(e) => report_runtime_error(filename, source, e),
        }
    }
}

/// Report a front-end error with ariadne
pub fn report_error(filename: &str, source: &str, error: &CompileError) {
    let kind = match error {
        CompileError::Lexer { .. } => "Lexer",
        CompileError::Parser { .. } => "Parser",
    };
    print_report(filename, source, &format!("{kind} error"), error.message(), Some(error.span()));
}

/// Report an evaluation failure with ariadne.
///
/// Errors raised on synthesized nodes carry no usable span; those are
/// printed as a bare message.
pub fn report_runtime_error(filename: &str, source: &str, error: &RuntimeError) {
    let span = error.span.filter(|s| !s.is_empty());
    print_report(filename, source, "Runtime error", &error.message, span);
}

fn print_report(filename: &str, source: &str, title: &str, message: &str, span: Option<Span>) {
    use ariadne::{Color, Label, Report, ReportKind, Source};

    let report = match span {
        Some(span) => Report::build(ReportKind::Error, (filename, span.start..span.end))
            .with_message(title)
            .with_label(
                Label::new((filename, span.start..span.end))
                    .with_message(message)
                    .with_color(Color::Red),
            )
            .finish(),
        None => Report::build(ReportKind::Error, (filename, 0..0))
            .with_message(format!("{title}: {message}"))
            .finish(),
    };

    if let Err(e) = report.eprint((filename, Source::from(source))) {
        eprintln!("{title}: {message} ({e})");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexer_error_display() {
        let err = CompileError::lexer("unexpected character: \"\\\"\"", Span::new(3, 4));
        assert_eq!(err.span(), Span::new(3, 4));
        assert!(err.to_string().starts_with("Lexer error at 3..4"));
    }

    #[test]
    fn test_prim_error_is_transparent() {
        let err: PrimError = RuntimeError::undefined_identifier("x").into();
        assert_eq!(err.to_string(), "Runtime error: undefined identifier: x");
        let err: PrimError = CompileError::parser("empty application", Span::new(0, 2)).into();
        assert!(matches!(err, PrimError::Compile(_)));
    }

    #[test]
    fn test_parser_error_message() {
        let err = CompileError::parser("empty application", Span::new(0, 2));
        assert_eq!(err.message(), "empty application");
        assert_eq!(err.to_string(), "Parser error at 0..2: empty application");
    }
}
