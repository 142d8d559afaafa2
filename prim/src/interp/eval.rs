//! Expression evaluator

use super::builtins::{Builtin, BuiltinOp};
use super::config::InterpConfig;
use super::env::{Frame, FrameRef};
use super::error::{InterpResult, RuntimeError};
use super::value::{Closure, Number, Value};
use crate::ast::{Expr, Spanned};
use crate::util::suggest_name;
use std::collections::HashMap;
use std::rc::Rc;
use tracing::{debug, trace};

/// Stack growth parameters for deep recursion
const STACK_RED_ZONE: usize = 128 * 1024; // 128KB remaining triggers growth
const STACK_GROW_SIZE: usize = 4 * 1024 * 1024; // Grow by 4MB each time

/// Evaluate a tree against a fresh base environment with default settings
pub fn eval(expr: &Spanned<Expr>) -> InterpResult<Value> {
    Interpreter::new().run(expr)
}

/// The interpreter
///
/// Holds only configuration and the current nesting depth; every value and
/// frame it produces is immutable.
pub struct Interpreter {
    config: InterpConfig,
    depth: usize,
}

impl Interpreter {
    /// Create a new interpreter
    pub fn new() -> Self {
        Self::with_config(InterpConfig::default())
    }

    pub fn with_config(config: InterpConfig) -> Self {
        Interpreter { config, depth: 0 }
    }

    pub fn config(&self) -> &InterpConfig {
        &self.config
    }

    /// Evaluate a root expression in the base environment
    pub fn run(&mut self, expr: &Spanned<Expr>) -> InterpResult<Value> {
        let env = Frame::base();
        debug!(kind = expr.node.kind_name(), "evaluating root expression");
        self.depth = 0;
        let result = self.eval(expr, &env);
        match &result {
            Ok(value) => debug!(%value, "evaluation finished"),
            Err(err) => debug!(error = %err.message, "evaluation failed"),
        }
        result
    }

    /// Evaluate `expr` under `env`.
    ///
    /// Failures get the span of the innermost node that raised them.
    pub fn eval(&mut self, expr: &Spanned<Expr>, env: &FrameRef) -> InterpResult<Value> {
        if self.depth >= self.config.max_depth {
            return Err(RuntimeError::stack_overflow(self.config.max_depth).with_span(expr.span));
        }
        self.depth += 1;
        // Grow stack if we're running low
        let result = stacker::maybe_grow(STACK_RED_ZONE, STACK_GROW_SIZE, || {
            self.eval_inner(expr, env)
        });
        self.depth -= 1;
        result.map_err(|e| e.with_span(expr.span))
    }

    fn eval_inner(&mut self, expr: &Spanned<Expr>, env: &FrameRef) -> InterpResult<Value> {
        match &expr.node {
            Expr::IntLit(n) => Ok(Value::Int(*n)),
            Expr::FloatLit(x) => Ok(Value::Float(*x)),
            Expr::StringLit(s) => Ok(Value::string(s.as_str())),
            Expr::Symbol(name) => self.eval_symbol(name, env),

            Expr::Lambda(lambda) => Ok(Value::Closure(Rc::new(Closure {
                lambda: Rc::clone(lambda),
                env: Rc::clone(env),
            }))),

            Expr::If {
                conditions,
                consequents,
                alternative,
            } => {
                for (cond, then) in conditions.iter().zip(consequents) {
                    if self.eval(cond, env)?.is_truthy() {
                        return self.eval(then, env);
                    }
                }
                self.eval(alternative, env)
            }

            Expr::Call { operator, args } => {
                let callee = self.eval(operator, env)?;
                let args = args
                    .iter()
                    .map(|arg| self.eval(arg, env))
                    .collect::<InterpResult<Vec<_>>>()?;
                self.apply(&callee, args)
            }
        }
    }

    /// Boolean keywords first, so they shadow any binding of the same name
    fn eval_symbol(&self, name: &str, env: &FrameRef) -> InterpResult<Value> {
        if let Some(b) = self.config.keywords.boolean(name) {
            return Ok(Value::Bool(b));
        }
        env.get(name).ok_or_else(|| {
            let suggestion = suggest_name(name, env.visible_names());
            RuntimeError::undefined_identifier_with_hint(name, suggestion)
        })
    }

    /// Apply an already-evaluated callee to already-evaluated arguments
    pub fn apply(&mut self, callee: &Value, args: Vec<Value>) -> InterpResult<Value> {
        match callee {
            Value::Builtin(builtin) => call_builtin(builtin, &args),
            Value::Closure(closure) => self.call_closure(closure, args),
            other => Err(RuntimeError::not_callable(other.clone())),
        }
    }

    /// Bind parameters positionally in a frame on top of the closure's
    /// captured frame, never the caller's.
    fn call_closure(&mut self, closure: &Closure, args: Vec<Value>) -> InterpResult<Value> {
        let arity = closure.arity();
        if args.len() != arity {
            return Err(RuntimeError::arity_mismatch(
                &closure.to_string(),
                arity,
                args.len(),
            ));
        }
        trace!(callee = %closure, argc = args.len(), "call closure");

        let bindings: HashMap<String, Value> = closure
            .params()
            .map(str::to_string)
            .zip(args)
            .collect();
        let frame = Frame::extend(&closure.env, bindings);
        self.eval(&closure.lambda.body, &frame)
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn call_builtin(builtin: &Builtin, args: &[Value]) -> InterpResult<Value> {
    let arity = builtin.op.arity();
    if args.len() != arity {
        return Err(RuntimeError::arity_mismatch(builtin.name, arity, args.len()));
    }
    trace!(callee = builtin.name, argc = args.len(), "call builtin");

    match builtin.op {
        BuiltinOp::NumberNumberToNumber(f) => {
            let (a, b) = (number_arg(builtin, &args[0])?, number_arg(builtin, &args[1])?);
            Ok(f(a, b).into())
        }
        BuiltinOp::NumberNumberToBool(f) => {
            let (a, b) = (number_arg(builtin, &args[0])?, number_arg(builtin, &args[1])?);
            Ok(Value::Bool(f(a, b)))
        }
        BuiltinOp::BoolBoolToBool(f) => {
            let (a, b) = (bool_arg(builtin, &args[0])?, bool_arg(builtin, &args[1])?);
            Ok(Value::Bool(f(a, b)))
        }
        BuiltinOp::BoolToBool(f) => Ok(Value::Bool(f(bool_arg(builtin, &args[0])?))),
        BuiltinOp::StringStringToString(f) => {
            let (a, b) = (str_arg(builtin, &args[0])?, str_arg(builtin, &args[1])?);
            Ok(Value::string(f(a, b)))
        }
    }
}

fn number_arg(builtin: &Builtin, value: &Value) -> InterpResult<Number> {
    value.as_number().ok_or_else(|| operand_error(builtin, value))
}

fn bool_arg(builtin: &Builtin, value: &Value) -> InterpResult<bool> {
    value.as_bool().ok_or_else(|| operand_error(builtin, value))
}

fn str_arg<'a>(builtin: &Builtin, value: &'a Value) -> InterpResult<&'a str> {
    value.as_str().ok_or_else(|| operand_error(builtin, value))
}

fn operand_error(builtin: &Builtin, value: &Value) -> RuntimeError {
    RuntimeError::type_mismatch(builtin.name, builtin.op.operand_kind(), value.clone())
}
