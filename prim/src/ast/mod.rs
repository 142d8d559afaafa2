//! Abstract Syntax Tree definitions
//!
//! The evaluator only reads these nodes; they are produced by the parser in
//! [`crate::parser`] or decoded from JSON by [`crate::interp::load_ast`].

mod expr;
mod span;

pub use expr::*;
pub use span::*;
