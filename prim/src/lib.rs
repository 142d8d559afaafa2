//! Prim: a small lexically-scoped expression language.
//!
//! The core is [`interp`]: a tree-walking evaluator over the AST in [`ast`].
//! [`lexer`] and [`parser`] provide an s-expression front end for it.

pub mod ast;
pub mod error;
pub mod interp;
pub mod keyword;
pub mod lexer;
pub mod parser;
pub mod repl;
mod util;

pub use ast::Span;
pub use error::{CompileError, PrimError, Result};
pub use interp::{eval, Interpreter, RuntimeError, Value};

/// Tokenize and parse a source string into its root expression
pub fn parse_source(filename: &str, source: &str) -> Result<ast::Spanned<ast::Expr>> {
    let tokens = lexer::tokenize(source)?;
    parser::parse(filename, source, tokens)
}

/// Parse and evaluate a source string with the given interpreter
pub fn eval_source(interp: &mut Interpreter, source: &str) -> std::result::Result<Value, PrimError> {
    let expr = parse_source("<input>", source)?;
    Ok(interp.run(&expr)?)
}
