//! Runtime Values for the Erio Programming Language
//!
//! `Value` is what the evaluator actually produces and passes around, as
//! distinct from the `ast::Constant` literals the parser builds. The two
//! look similar but serve different stages: a `Constant` is static source
//! text already classified by the lexer; a `Value` is a live runtime datum
//! that may be shared (a `Sequence`) or may close over a live environment
//! (a `Function`).
//!
//! `Sequence` is the only mutable value kind (see the language's data
//! model). It is reference-counted so that passing a sequence into a
//! function and mutating it there is visible to the caller, exactly as
//! `seti`/`insert` require.

use std::cell::RefCell;
use std::fmt;
use std::io::Write;
use std::rc::Rc;

use crate::ast::Block;
use crate::environment::Environment;
use crate::error::Result;

/// A primitive's body: given the call frame built for its invocation
/// (parameters already bound by name) and the program's output sink,
/// produce the call's result. The sink is threaded explicitly rather than
/// stashed in the environment under a reserved name, since Rust has no
/// convenient way to hold a `dyn Write` inside a `Value` without extra
/// indirection for a single primitive's sake.
pub type PrimitiveFn = fn(&Environment, &mut dyn Write) -> Result<Option<Value>>;

/// The body of a `Function` value: either Erio source statements, or an
/// opaque host operation. Both are invoked uniformly by the evaluator.
#[derive(Clone)]
pub enum FunctionBody {
    User(Rc<Block>),
    Primitive(PrimitiveFn),
}

/// A callable value: captured defining environment, ordered parameter
/// names, and a body. Primitives and user-defined functions share this one
/// shape; invocation does not need to distinguish them beyond reading
/// `body`.
#[derive(Clone)]
pub struct Function {
    pub params: Vec<String>,
    pub captured_env: Environment,
    pub body: FunctionBody,
}

#[derive(Clone)]
pub enum Value {
    Integer(i64),
    Boolean(bool),
    /// Immutable text, quotes already stripped.
    String(Rc<str>),
    Sequence(Rc<RefCell<Vec<Value>>>),
    Function(Rc<Function>),
}

impl Value {
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::String(s.into())
    }

    pub fn sequence(elements: Vec<Value>) -> Self {
        Value::Sequence(Rc::new(RefCell::new(elements)))
    }

    /// Only `Boolean(true)` is truthy. Every other value, including
    /// integers and sequences, is not — there is no implicit truthiness.
    pub fn is_truthy(&self) -> bool {
        matches!(self, Value::Boolean(true))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Boolean(_) => "boolean",
            Value::String(_) => "string",
            Value::Sequence(_) => "sequence",
            Value::Function(_) => "function",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::String(s) => write!(f, "{}", s),
            Value::Sequence(items) => {
                write!(f, "[")?;
                for (i, item) in items.borrow().iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                write!(f, "]")
            }
            Value::Function(_) => write!(f, "<function>"),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

/// Equality on the "raw underlying values", as the `eq` primitive and the
/// `==`/`!=` comparison operators need. Functions compare by identity;
/// values of different kinds are never equal.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Sequence(a), Value::Sequence(b)) => *a.borrow() == *b.borrow(),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Ordering for `<`, `>`, `<=`, `>=`, and the `lt` primitive: the language
/// applies these directly to the "raw underlying value" like `==`/`!=` do,
/// not just to integers, so two integers or two strings both order (the
/// latter lexicographically). Any other pairing — mixed kinds, sequences,
/// functions, booleans — has no defined order.
pub fn compare_order(lhs: &Value, rhs: &Value) -> Result<std::cmp::Ordering> {
    match (lhs, rhs) {
        (Value::Integer(a), Value::Integer(b)) => Ok(a.cmp(b)),
        (Value::String(a), Value::String(b)) => Ok(a.as_ref().cmp(b.as_ref())),
        _ => Err(crate::error::ErioError::runtime(format!(
            "comparison expects two integers or two strings, got a {} and a {}",
            lhs.type_name(),
            rhs.type_name()
        ))),
    }
}
