//! Lexical Environments for the Erio Programming Language
//!
//! An `Environment` is a mapping from names to runtime values, with an
//! optional parent. Lookups walk the parent chain; writes always land in
//! the local frame. Functions capture the environment active at the point
//! they were defined, so looking a name up later still sees whatever that
//! environment held when the function is eventually called — including
//! names defined after the function itself, as long as they're defined
//! before the call.
//!
//! Frames are reference-counted rather than owned by a tree, because the
//! reference graph is not a tree: a function's captured environment can be
//! the global frame, and the global frame holds functions that capture it.
//! `Rc<RefCell<..>>` tolerates that cycle without needing a collector —
//! the whole graph just leaks at process exit, which is fine for a
//! short-lived interpreter process.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::value::Value;

struct Frame {
    values: HashMap<String, Value>,
    parent: Option<Environment>,
}

/// A cheap, cloneable handle to a shared environment frame.
#[derive(Clone)]
pub struct Environment(Rc<RefCell<Frame>>);

impl Environment {
    /// A fresh frame with no parent — used once, for the global scope.
    pub fn root() -> Self {
        Environment(Rc::new(RefCell::new(Frame {
            values: HashMap::new(),
            parent: None,
        })))
    }

    /// A fresh frame whose parent is `self` — used both for function call
    /// frames (parented to the function's *captured* environment) and for
    /// any other nested scope.
    pub fn child(&self) -> Self {
        Environment(Rc::new(RefCell::new(Frame {
            values: HashMap::new(),
            parent: Some(self.clone()),
        })))
    }

    /// Walks the parent chain looking for `name`, returning a clone of the
    /// value if found.
    pub fn get(&self, name: &str) -> Option<Value> {
        let frame = self.0.borrow();
        match frame.values.get(name) {
            Some(value) => Some(value.clone()),
            None => frame.parent.as_ref().and_then(|parent| parent.get(name)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        let frame = self.0.borrow();
        frame.values.contains_key(name)
            || frame
                .parent
                .as_ref()
                .map(|parent| parent.contains(name))
                .unwrap_or(false)
    }

    /// Binds `name` to `value` in this frame specifically, never in a
    /// parent. This is how assignment (there is no separate declaration
    /// form) and parameter binding both work: a name written in a frame
    /// shadows the same name in any enclosing frame from then on.
    pub fn define(&self, name: impl Into<String>, value: Value) {
        self.0.borrow_mut().values.insert(name.into(), value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_walks_parent_chain() {
        let global = Environment::root();
        global.define("x", Value::Integer(1));
        let frame = global.child();
        assert_eq!(frame.get("x"), Some(Value::Integer(1)));
    }

    #[test]
    fn write_in_child_does_not_mutate_parent() {
        let global = Environment::root();
        global.define("x", Value::Integer(1));
        let frame = global.child();
        frame.define("x", Value::Integer(2));
        assert_eq!(frame.get("x"), Some(Value::Integer(2)));
        assert_eq!(global.get("x"), Some(Value::Integer(1)));
    }

    #[test]
    fn reassigning_captured_name_is_visible_through_clone() {
        let global = Environment::root();
        global.define("x", Value::Integer(1));
        let captured = global.clone();
        global.define("x", Value::Integer(9));
        assert_eq!(captured.get("x"), Some(Value::Integer(9)));
    }

    #[test]
    fn missing_name_is_none() {
        let global = Environment::root();
        assert_eq!(global.get("missing"), None);
        assert!(!global.contains("missing"));
    }
}
