//! Built-in Primitives for the Erio Programming Language
//!
//! Every primitive is registered into the global environment as an ordinary
//! `Function` value whose body is `FunctionBody::Primitive`, exactly like a
//! user-defined function except the body is a Rust `fn` instead of Erio
//! statements. The evaluator's call machinery does not need to know which
//! kind of body it invoked: it builds the call frame, binds the arguments
//! to the declared parameter names, and then runs whichever body the
//! `Function` carries.
//!
//! Each primitive below therefore reads its operands back out of the call
//! frame it was handed, by the same parameter names this module declares
//! when registering the function — `add`'s frame always has `lhs` and
//! `rhs` bound, because that's the parameter list `register` gave it.

use std::io::Write;
use std::rc::Rc;

use crate::environment::Environment;
use crate::error::{ErioError, Result};
use crate::value::{Function, FunctionBody, Value};

/// Populates `global` with every primitive the language defines.
pub fn install(global: &Environment) {
    register(global, "print", &["s"], print);
    register(global, "add", &["lhs", "rhs"], add);
    register(global, "sub", &["lhs", "rhs"], sub);
    register(global, "lt", &["lhs", "rhs"], lt);
    register(global, "eq", &["lhs", "rhs"], eq);
    register(global, "geti", &["seq", "i"], geti);
    register(global, "seti", &["seq", "i", "value"], seti);
    register(global, "len", &["seq"], len);
    register(global, "insert", &["seq", "i", "value"], insert);
}

fn register(global: &Environment, name: &str, params: &[&str], body: crate::value::PrimitiveFn) {
    let function = Function {
        params: params.iter().map(|p| p.to_string()).collect(),
        captured_env: global.clone(),
        body: FunctionBody::Primitive(body),
    };
    global.define(name, Value::Function(Rc::new(function)));
}

fn arg(frame: &Environment, name: &str) -> Result<Value> {
    frame
        .get(name)
        .ok_or_else(|| ErioError::runtime(format!("missing argument '{}'", name)))
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

fn as_sequence(value: &Value, context: &str) -> Result<Rc<std::cell::RefCell<Vec<Value>>>> {
    match value {
        Value::Sequence(items) => Ok(items.clone()),
        other => Err(ErioError::runtime(format!(
            "{} expects a sequence, got a {}",
            context,
            other.type_name()
        ))),
    }
}

/// Writes `true`/`false` for Booleans, otherwise the value's textual form.
/// No trailing newline. Any argument beyond the first (`s`) is silently
/// ignored, since excess arguments are never diagnosed.
fn print(frame: &Environment, sink: &mut dyn Write) -> Result<Option<Value>> {
    let value = arg(frame, "s")?;
    write!(sink, "{}", value).map_err(|e| ErioError::runtime(format!("write failed: {}", e)))?;
    Ok(None)
}

fn add(frame: &Environment, _sink: &mut dyn Write) -> Result<Option<Value>> {
    let lhs = as_integer(&arg(frame, "lhs")?, "add")?;
    let rhs = as_integer(&arg(frame, "rhs")?, "add")?;
    Ok(Some(Value::Integer(lhs + rhs)))
}

fn sub(frame: &Environment, _sink: &mut dyn Write) -> Result<Option<Value>> {
    let lhs = as_integer(&arg(frame, "lhs")?, "sub")?;
    let rhs = as_integer(&arg(frame, "rhs")?, "sub")?;
    Ok(Some(Value::Integer(lhs - rhs)))
}

/// `<` on underlying values — defined for two integers or two strings
/// (lexicographically), not restricted to integers like `add`/`sub`.
fn lt(frame: &Environment, _sink: &mut dyn Write) -> Result<Option<Value>> {
    let lhs = arg(frame, "lhs")?;
    let rhs = arg(frame, "rhs")?;
    let ordering = crate::value::compare_order(&lhs, &rhs)?;
    Ok(Some(Value::Boolean(ordering == std::cmp::Ordering::Less)))
}

fn eq(frame: &Environment, _sink: &mut dyn Write) -> Result<Option<Value>> {
    let lhs = arg(frame, "lhs")?;
    let rhs = arg(frame, "rhs")?;
    Ok(Some(Value::Boolean(lhs == rhs)))
}

fn geti(frame: &Environment, _sink: &mut dyn Write) -> Result<Option<Value>> {
    let seq = as_sequence(&arg(frame, "seq")?, "geti")?;
    let index = as_integer(&arg(frame, "i")?, "geti")?;
    let items = seq.borrow();
    let element = index_into(&items, index, "geti")?;
    Ok(Some(element.clone()))
}

fn seti(frame: &Environment, _sink: &mut dyn Write) -> Result<Option<Value>> {
    let seq = as_sequence(&arg(frame, "seq")?, "seti")?;
    let index = as_integer(&arg(frame, "i")?, "seti")?;
    let value = arg(frame, "value")?;
    let mut items = seq.borrow_mut();
    let len = items.len() as i64;
    if index < 0 || index >= len {
        return Err(ErioError::runtime(format!("seti index {} out of range", index)));
    }
    items[index as usize] = value;
    Ok(None)
}

fn len(frame: &Environment, _sink: &mut dyn Write) -> Result<Option<Value>> {
    let value = arg(frame, "seq")?;
    let length = match &value {
        Value::Sequence(items) => items.borrow().len(),
        Value::String(s) => s.chars().count(),
        other => {
            return Err(ErioError::runtime(format!(
                "len expects a sequence, got a {}",
                other.type_name()
            )))
        }
    };
    Ok(Some(Value::Integer(length as i64)))
}

fn insert(frame: &Environment, _sink: &mut dyn Write) -> Result<Option<Value>> {
    let seq = as_sequence(&arg(frame, "seq")?, "insert")?;
    let index = as_integer(&arg(frame, "i")?, "insert")?;
    let value = arg(frame, "value")?;
    let mut items = seq.borrow_mut();
    let len = items.len() as i64;
    if index < 0 || index > len {
        return Err(ErioError::runtime(format!("insert index {} out of range", index)));
    }
    items.insert(index as usize, value);
    Ok(None)
}

fn index_into<'a>(items: &'a [Value], index: i64, context: &str) -> Result<&'a Value> {
    if index < 0 || index as usize >= items.len() {
        return Err(ErioError::runtime(format!("{} index {} out of range", context, index)));
    }
    Ok(&items[index as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame_with(pairs: &[(&str, Value)]) -> Environment {
        let env = Environment::root();
        for (name, value) in pairs {
            env.define(*name, value.clone());
        }
        env
    }

    #[test]
    fn add_sums_integers() {
        let frame = frame_with(&[("lhs", Value::Integer(4)), ("rhs", Value::Integer(3))]);
        let mut sink = Vec::new();
        assert_eq!(add(&frame, &mut sink).unwrap(), Some(Value::Integer(7)));
    }

    #[test]
    fn print_writes_textual_form_without_newline() {
        let frame = frame_with(&[("s", Value::Boolean(true))]);
        let mut sink = Vec::new();
        print(&frame, &mut sink).unwrap();
        assert_eq!(sink, b"true");
    }

    #[test]
    fn geti_reads_element_by_index() {
        let seq = Value::sequence(vec![Value::Integer(10), Value::Integer(20)]);
        let frame = frame_with(&[("seq", seq), ("i", Value::Integer(1))]);
        let mut sink = Vec::new();
        assert_eq!(geti(&frame, &mut sink).unwrap(), Some(Value::Integer(20)));
    }

    #[test]
    fn seti_mutates_shared_sequence() {
        let seq = Value::sequence(vec![Value::Integer(1), Value::Integer(2)]);
        let frame = frame_with(&[
            ("seq", seq.clone()),
            ("i", Value::Integer(0)),
            ("value", Value::Integer(99)),
        ]);
        let mut sink = Vec::new();
        seti(&frame, &mut sink).unwrap();
        if let Value::Sequence(items) = seq {
            assert_eq!(items.borrow()[0], Value::Integer(99));
        } else {
            unreachable!()
        }
    }

    #[test]
    fn insert_shifts_later_elements_right() {
        let seq = Value::sequence(vec![Value::string("a"), Value::string("b")]);
        let frame = frame_with(&[
            ("seq", seq.clone()),
            ("i", Value::Integer(1)),
            ("value", Value::string("x")),
        ]);
        let mut sink = Vec::new();
        insert(&frame, &mut sink).unwrap();
        if let Value::Sequence(items) = seq {
            let items = items.borrow();
            assert_eq!(items.len(), 3);
            assert_eq!(items[1], Value::string("x"));
            assert_eq!(items[2], Value::string("b"));
        } else {
            unreachable!()
        }
    }

    #[test]
    fn lt_orders_strings_lexicographically() {
        let frame = frame_with(&[("lhs", Value::string("apple")), ("rhs", Value::string("banana"))]);
        let mut sink = Vec::new();
        assert_eq!(lt(&frame, &mut sink).unwrap(), Some(Value::Boolean(true)));
    }

    #[test]
    fn lt_rejects_mixed_kinds() {
        let frame = frame_with(&[("lhs", Value::Integer(1)), ("rhs", Value::string("a"))]);
        let mut sink = Vec::new();
        assert!(lt(&frame, &mut sink).is_err());
    }

    #[test]
    fn len_supports_sequences_and_strings() {
        let mut sink = Vec::new();
        let frame = frame_with(&[("seq", Value::sequence(vec![Value::Integer(1)]))]);
        assert_eq!(len(&frame, &mut sink).unwrap(), Some(Value::Integer(1)));

        let frame = frame_with(&[("seq", Value::string("hi"))]);
        assert_eq!(len(&frame, &mut sink).unwrap(), Some(Value::Integer(2)));
    }
}
