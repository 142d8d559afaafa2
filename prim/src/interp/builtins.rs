//! Builtin operator registry
//!
//! Every operator is described by its signature shape, so the evaluator can
//! check arity and operand kinds per shape instead of per operator. The table
//! is built once and never changes.

use super::value::Number;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

/// A named primitive operator
#[derive(Clone, Copy)]
pub struct Builtin {
    pub name: &'static str,
    pub op: BuiltinOp,
}

/// Signature shape plus the native function implementing it
#[derive(Clone, Copy)]
pub enum BuiltinOp {
    NumberNumberToNumber(fn(Number, Number) -> Number),
    NumberNumberToBool(fn(Number, Number) -> bool),
    BoolBoolToBool(fn(bool, bool) -> bool),
    BoolToBool(fn(bool) -> bool),
    StringStringToString(fn(&str, &str) -> String),
}

impl BuiltinOp {
    /// Required argument count
    pub fn arity(&self) -> usize {
        match self {
            BuiltinOp::BoolToBool(_) => 1,
            BuiltinOp::NumberNumberToNumber(_)
            | BuiltinOp::NumberNumberToBool(_)
            | BuiltinOp::BoolBoolToBool(_)
            | BuiltinOp::StringStringToString(_) => 2,
        }
    }

    /// Kind every operand must have
    pub fn operand_kind(&self) -> &'static str {
        match self {
            BuiltinOp::NumberNumberToNumber(_) | BuiltinOp::NumberNumberToBool(_) => "number",
            BuiltinOp::BoolBoolToBool(_) | BuiltinOp::BoolToBool(_) => "bool",
            BuiltinOp::StringStringToString(_) => "string",
        }
    }

    pub fn signature(&self) -> &'static str {
        match self {
            BuiltinOp::NumberNumberToNumber(_) => "(number, number) -> number",
            BuiltinOp::NumberNumberToBool(_) => "(number, number) -> bool",
            BuiltinOp::BoolBoolToBool(_) => "(bool, bool) -> bool",
            BuiltinOp::BoolToBool(_) => "(bool) -> bool",
            BuiltinOp::StringStringToString(_) => "(string, string) -> string",
        }
    }
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Builtin({} : {})", self.name, self.op.signature())
    }
}

const BUILTINS: &[Builtin] = &[
    // Arithmetic
    Builtin { name: "+", op: BuiltinOp::NumberNumberToNumber(Number::add) },
    Builtin { name: "-", op: BuiltinOp::NumberNumberToNumber(Number::sub) },
    Builtin { name: "*", op: BuiltinOp::NumberNumberToNumber(Number::mul) },
    Builtin { name: "/", op: BuiltinOp::NumberNumberToNumber(Number::div) },
    // Comparison
    Builtin { name: "=", op: BuiltinOp::NumberNumberToBool(num_eq) },
    Builtin { name: "<", op: BuiltinOp::NumberNumberToBool(num_lt) },
    Builtin { name: ">", op: BuiltinOp::NumberNumberToBool(num_gt) },
    Builtin { name: "<=", op: BuiltinOp::NumberNumberToBool(num_le) },
    Builtin { name: ">=", op: BuiltinOp::NumberNumberToBool(num_ge) },
    // Logic
    Builtin { name: "and", op: BuiltinOp::BoolBoolToBool(bool_and) },
    Builtin { name: "or", op: BuiltinOp::BoolBoolToBool(bool_or) },
    Builtin { name: "not", op: BuiltinOp::BoolToBool(bool_not) },
    // Strings
    Builtin { name: "++", op: BuiltinOp::StringStringToString(str_concat) },
];

static REGISTRY: LazyLock<HashMap<&'static str, Builtin>> =
    LazyLock::new(|| BUILTINS.iter().map(|b| (b.name, *b)).collect());

/// The process-wide operator table
pub fn registry() -> &'static HashMap<&'static str, Builtin> {
    &REGISTRY
}

/// Find a builtin by operator name
pub fn lookup(name: &str) -> Option<Builtin> {
    REGISTRY.get(name).copied()
}

fn num_eq(a: Number, b: Number) -> bool {
    a.compare(b) == Some(Ordering::Equal)
}

fn num_lt(a: Number, b: Number) -> bool {
    a.compare(b) == Some(Ordering::Less)
}

fn num_gt(a: Number, b: Number) -> bool {
    a.compare(b) == Some(Ordering::Greater)
}

fn num_le(a: Number, b: Number) -> bool {
    matches!(a.compare(b), Some(Ordering::Less | Ordering::Equal))
}

fn num_ge(a: Number, b: Number) -> bool {
    matches!(a.compare(b), Some(Ordering::Greater | Ordering::Equal))
}

fn bool_and(a: bool, b: bool) -> bool {
    a && b
}

fn bool_or(a: bool, b: bool) -> bool {
    a || b
}

fn bool_not(a: bool) -> bool {
    !a
}

fn str_concat(a: &str, b: &str) -> String {
    let mut s = String::with_capacity(a.len() + b.len());
    s.push_str(a);
    s.push_str(b);
    s
}
