//! Tree-Walking Evaluator for the Erio Programming Language
//!
//! The evaluator walks a statement sequence against a mutable environment,
//! writing program output to a caller-supplied sink. A block execution
//! returns `Option<Value>`: `Some` exactly when a `return` has executed and
//! its value is still propagating outward through enclosing `if`/`while`
//! blocks; `None` otherwise. This is the entire mechanism by which `return`
//! unwinds arbitrary nesting — there is no separate control-flow signal
//! type, just the option itself bubbling up through each block runner.

use std::io::Write;
use std::rc::Rc;

use crate::ast::{AddOp, Block, Call, CompOp, Constant, Expression, MulOp, SignOp, Statement};
use crate::environment::Environment;
use crate::error::{ErioError, Result};
use crate::value::{Function, FunctionBody, Value};

pub struct Interpreter {
    global: Environment,
}

impl Interpreter {
    pub fn new() -> Self {
        let global = Environment::root();
        crate::builtins::install(&global);
        Interpreter { global }
    }

    pub fn global(&self) -> &Environment {
        &self.global
    }

    /// Runs a top-level program against this interpreter's global
    /// environment, writing output to `sink`.
    pub fn run(&self, program: &Block, sink: &mut dyn Write) -> Result<()> {
        self.execute_block(program, &self.global, sink)?;
        Ok(())
    }

    fn execute_block(&self, block: &Block, env: &Environment, sink: &mut dyn Write) -> Result<Option<Value>> {
        for statement in block {
            if let Some(value) = self.execute_statement(statement, env, sink)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    fn execute_statement(&self, statement: &Statement, env: &Environment, sink: &mut dyn Write) -> Result<Option<Value>> {
        match statement {
            Statement::If {
                condition,
                then_block,
                else_block,
            } => {
                let cond = self.evaluate_expression(condition, env, sink)?;
                if cond.is_truthy() {
                    self.execute_block(then_block, env, sink)
                } else {
                    self.execute_block(else_block, env, sink)
                }
            }
            Statement::While { condition, body } => loop {
                let cond = self.evaluate_expression(condition, env, sink)?;
                if !cond.is_truthy() {
                    return Ok(None);
                }
                if let Some(value) = self.execute_block(body, env, sink)? {
                    return Ok(Some(value));
                }
            },
            Statement::Assignment { name, value } => {
                let evaluated = self.evaluate_expression(value, env, sink)?;
                env.define(name, evaluated);
                Ok(None)
            }
            Statement::FunctionDef { name, params, body } => {
                let function = Function {
                    params: params.clone(),
                    captured_env: env.clone(),
                    body: FunctionBody::User(Rc::new(body.clone())),
                };
                env.define(name, Value::Function(Rc::new(function)));
                Ok(None)
            }
            Statement::Return(expr) => {
                let value = self.evaluate_expression(expr, env, sink)?;
                Ok(Some(value))
            }
            Statement::Call(call) => {
                // A call used for its side effect: whether the callee
                // produced a value or not is irrelevant here, unlike in
                // expression position.
                self.evaluate_call(call, env, sink)?;
                Ok(None)
            }
        }
    }

    fn evaluate_expression(&self, expr: &Expression, env: &Environment, sink: &mut dyn Write) -> Result<Value> {
        match expr {
            Expression::Constant(constant) => Ok(match constant {
                Constant::Integer(n) => Value::Integer(*n),
                Constant::Boolean(b) => Value::Boolean(*b),
                Constant::String(s) => Value::string(s.clone()),
            }),
            Expression::Variable(name) => env
                .get(name)
                .ok_or_else(|| ErioError::runtime(format!("undefined variable '{}'", name))),
            Expression::Sequence(elements) => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.evaluate_expression(element, env, sink)?);
                }
                Ok(Value::sequence(values))
            }
            Expression::Call(call) => self.evaluate_call(call, env, sink)?.ok_or_else(|| {
                ErioError::runtime(format!(
                    "call to '{}' produced no value",
                    call.callee
                ))
            }),
            Expression::Sign { op, operand } => {
                let value = self.evaluate_expression(operand, env, sink)?;
                let n = as_integer(&value, "unary +/-")?;
                Ok(Value::Integer(match op {
                    SignOp::Plus => n,
                    SignOp::Minus => -n,
                }))
            }
            Expression::Not(operand) => {
                let value = self.evaluate_expression(operand, env, sink)?;
                Ok(Value::Boolean(!value.is_truthy()))
            }
            Expression::Or { left, right } => {
                let lhs = self.evaluate_expression(left, env, sink)?;
                if lhs.is_truthy() {
                    return Ok(lhs);
                }
                let rhs = self.evaluate_expression(right, env, sink)?;
                if rhs.is_truthy() {
                    return Ok(rhs);
                }
                Ok(Value::Boolean(false))
            }
            Expression::And { left, right } => {
                let lhs = self.evaluate_expression(left, env, sink)?;
                if !lhs.is_truthy() {
                    return Ok(Value::Boolean(false));
                }
                let rhs = self.evaluate_expression(right, env, sink)?;
                if !rhs.is_truthy() {
                    return Ok(Value::Boolean(false));
                }
                Ok(rhs)
            }
            Expression::Comp { left, op, right } => {
                let lhs = self.evaluate_expression(left, env, sink)?;
                let rhs = self.evaluate_expression(right, env, sink)?;
                Ok(Value::Boolean(compare(&lhs, *op, &rhs)?))
            }
            Expression::Add { left, op, right } => {
                let lhs = as_integer(&self.evaluate_expression(left, env, sink)?, "+/-")?;
                let rhs = as_integer(&self.evaluate_expression(right, env, sink)?, "+/-")?;
                Ok(Value::Integer(match op {
                    AddOp::Add => lhs + rhs,
                    AddOp::Sub => lhs - rhs,
                }))
            }
            Expression::Mul { left, op, right } => {
                let lhs = as_integer(&self.evaluate_expression(left, env, sink)?, "*//%")?;
                let rhs = as_integer(&self.evaluate_expression(right, env, sink)?, "*//%")?;
                Ok(Value::Integer(match op {
                    MulOp::Mul => lhs * rhs,
                    MulOp::Div => floor_div(lhs, rhs)?,
                    MulOp::Mod => floor_mod(lhs, rhs)?,
                }))
            }
        }
    }

    /// Invokes a function or primitive and returns whatever it propagated:
    /// `Some` for a user function that hit `return` (or a primitive that
    /// computes a value), `None` for a user function that fell off the end
    /// of its body without returning, or a void primitive (`print`, `seti`,
    /// `insert`). Callers in statement position may discard either; callers
    /// in expression position must reject `None` themselves, since there is
    /// no "no value" kind in the runtime value model.
    fn evaluate_call(&self, call: &Call, env: &Environment, sink: &mut dyn Write) -> Result<Option<Value>> {
        let callee = env
            .get(&call.callee)
            .ok_or_else(|| ErioError::runtime(format!("undefined function '{}'", call.callee)))?;
        let function = match callee {
            Value::Function(f) => f,
            other => {
                return Err(ErioError::runtime(format!(
                    "'{}' is not callable (got a {})",
                    call.callee,
                    other.type_name()
                )))
            }
        };

        let mut args = Vec::with_capacity(call.args.len());
        for arg in &call.args {
            args.push(self.evaluate_expression(arg, env, sink)?);
        }

        // New frame parented to the function's *captured* environment, not
        // the caller's — this is what makes scoping lexical rather than
        // dynamic. Excess or missing arguments are not diagnosed: extra
        // values are dropped, missing ones simply leave the parameter
        // unbound in the frame.
        let frame = function.captured_env.child();
        for (name, value) in function.params.iter().zip(args.into_iter()) {
            frame.define(name, value);
        }

        match &function.body {
            FunctionBody::User(body) => self.execute_block(body, &frame, sink),
            FunctionBody::Primitive(primitive) => primitive(&frame, sink),
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

fn as_integer(value: &Value, context: &str) -> Result<i64> {
    match value {
        Value::Integer(n) => Ok(*n),
        other => Err(ErioError::runtime(format!(
            "{} expects an integer, got a {}",
            context,
            other.type_name()
        ))),
    }
}

/// `Eq`/`NotEq` use `Value`'s own `PartialEq`, which already handles every
/// kind. The ordering variants go through `compare_order`, which is only
/// defined for two integers or two strings — not "extract underlying
/// integers" like `Add`/`Mul`, since `lt`/`<` are specified generically
/// over "underlying values", matching `erio.py`'s `operator.lt` applied
/// directly to `.val`.
fn compare(lhs: &Value, op: CompOp, rhs: &Value) -> Result<bool> {
    match op {
        CompOp::Eq => Ok(lhs == rhs),
        CompOp::NotEq => Ok(lhs != rhs),
        _ => {
            use std::cmp::Ordering;
            let ordering = crate::value::compare_order(lhs, rhs)?;
            Ok(match op {
                CompOp::Lt => ordering == Ordering::Less,
                CompOp::Gt => ordering == Ordering::Greater,
                CompOp::Lteq => ordering != Ordering::Greater,
                CompOp::Gteq => ordering != Ordering::Less,
                CompOp::Eq | CompOp::NotEq => unreachable!(),
            })
        }
    }
}

/// Floor division: matches the sign convention described in the language's
/// arithmetic rules, not Rust's truncating `/`.
fn floor_div(a: i64, b: i64) -> Result<i64> {
    if b == 0 {
        return Err(ErioError::runtime("division by zero"));
    }
    let q = a / b;
    let r = a % b;
    if r != 0 && (r < 0) != (b < 0) {
        Ok(q - 1)
    } else {
        Ok(q)
    }
}

/// Modulus matching the sign of the divisor, per the floor-division
/// convention.
fn floor_mod(a: i64, b: i64) -> Result<i64> {
    if b == 0 {
        return Err(ErioError::runtime("division by zero"));
    }
    let r = a % b;
    if r != 0 && (r < 0) != (b < 0) {
        Ok(r + b)
    } else {
        Ok(r)
    }
}
