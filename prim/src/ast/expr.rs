//! Expression AST nodes

use super::Spanned;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

/// Expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// Integer literal
    IntLit(i64),
    /// Float literal
    FloatLit(f64),
    /// String literal
    StringLit(String),
    /// Symbol reference (also carries the boolean keywords)
    Symbol(String),

    /// Lambda: (lambda (params...) body)
    Lambda(Rc<Lambda>),

    /// Multi-branch conditional.
    ///
    /// `conditions[i]` selects `consequents[i]`; the first truthy condition
    /// wins and `alternative` is taken when none is.
    If {
        conditions: Vec<Spanned<Expr>>,
        consequents: Vec<Spanned<Expr>>,
        alternative: Box<Spanned<Expr>>,
    },

    /// Application: (operator args...)
    Call {
        operator: Box<Spanned<Expr>>,
        args: Vec<Spanned<Expr>>,
    },
}

/// Lambda node, shared between the tree and every closure created from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lambda {
    pub params: Vec<Spanned<String>>,
    pub body: Spanned<Expr>,
}

impl Lambda {
    /// Parameter names in declaration order
    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.node.as_str())
    }
}

impl Expr {
    /// Variant name for diagnostics and logging
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::IntLit(_) => "int literal",
            Expr::FloatLit(_) => "float literal",
            Expr::StringLit(_) => "string literal",
            Expr::Symbol(_) => "symbol",
            Expr::Lambda(_) => "lambda",
            Expr::If { .. } => "if",
            Expr::Call { .. } => "call",
        }
    }

    // Builders for trees assembled in code. Every node gets an empty span.

    pub fn int(n: i64) -> Spanned<Expr> {
        Spanned::synthetic(Expr::IntLit(n))
    }

    pub fn float(x: f64) -> Spanned<Expr> {
        Spanned::synthetic(Expr::FloatLit(x))
    }

    pub fn string(s: impl Into<String>) -> Spanned<Expr> {
        Spanned::synthetic(Expr::StringLit(s.into()))
    }

    pub fn symbol(name: impl Into<String>) -> Spanned<Expr> {
        Spanned::synthetic(Expr::Symbol(name.into()))
    }

    pub fn lambda(params: &[&str], body: Spanned<Expr>) -> Spanned<Expr> {
        let params = params
            .iter()
            .map(|p| Spanned::synthetic(p.to_string()))
            .collect();
        Spanned::synthetic(Expr::Lambda(Rc::new(Lambda { params, body })))
    }

    pub fn if_else(
        branches: Vec<(Spanned<Expr>, Spanned<Expr>)>,
        alternative: Spanned<Expr>,
    ) -> Spanned<Expr> {
        let (conditions, consequents) = branches.into_iter().unzip();
        Spanned::synthetic(Expr::If {
            conditions,
            consequents,
            alternative: Box::new(alternative),
        })
    }

    pub fn call(operator: Spanned<Expr>, args: Vec<Spanned<Expr>>) -> Spanned<Expr> {
        Spanned::synthetic(Expr::Call {
            operator: Box::new(operator),
            args,
        })
    }
}
