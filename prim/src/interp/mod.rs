//! Tree-walking interpreter
//!
//! Evaluates a [`Spanned<Expr>`](crate::ast::Spanned) under an immutable
//! chain of [`Frame`]s. Builtins come from a fixed registry; closures capture
//! the frame they were created in.

mod builtins;
mod config;
mod env;
mod error;
mod eval;
mod load;
mod value;

pub use builtins::{lookup as lookup_builtin, registry as builtin_registry, Builtin, BuiltinOp};
pub use config::{ConfigError, InterpConfig, DEFAULT_MAX_DEPTH};
pub use env::{Frame, FrameRef};
pub use error::{ErrorKind, InterpResult, RuntimeError};
pub use eval::{eval, Interpreter};
pub use load::load_ast;
pub use value::{Closure, Number, Value};

/// The base environment: builtins only, no parent
pub fn base_env() -> FrameRef {
    Frame::base()
}
