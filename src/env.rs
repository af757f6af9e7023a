// ABOUTME: Environment module for symbol bindings and the lexical parent chain

use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// A symbol table with an optional link to an enclosing environment.
///
/// The root environment (no parent) holds the builtins and everything
/// bound with `def`. Lambdas carry their own environment, whose parent
/// is wired to the call site at application time.
#[derive(Debug)]
pub struct Environment {
    bindings: RefCell<HashMap<String, Value>>,
    parent: RefCell<Option<Rc<Environment>>>,
}

impl Environment {
    /// Creates a new, parentless environment.
    pub fn new() -> Rc<Self> {
        Rc::new(Environment {
            bindings: RefCell::new(HashMap::new()),
            parent: RefCell::new(None),
        })
    }

    /// Looks up a symbol here and then up the parent chain, returning a
    /// copy of the bound value, or an Err value if the symbol is
    /// nowhere bound.
    pub fn get(&self, name: &str) -> Value {
        if let Some(value) = self.bindings.borrow().get(name) {
            return value.clone();
        }

        match &*self.parent.borrow() {
            Some(parent) => parent.get(name),
            None => Value::err(format!("unbound symbol '{}'", name)),
        }
    }

    /// Binds a symbol in THIS environment, replacing any prior binding.
    pub fn put(&self, name: &str, value: Value) {
        self.bindings.borrow_mut().insert(name.to_string(), value);
    }

    /// Binds a symbol at the root of the parent chain.
    pub fn def(&self, name: &str, value: Value) {
        let parent = self.parent.borrow().clone();
        match parent {
            Some(p) => p.def(name, value),
            None => self.put(name, value),
        }
    }

    /// Wires the lexical parent. Called once per lambda application.
    pub fn set_parent(&self, parent: Rc<Environment>) {
        *self.parent.borrow_mut() = Some(parent);
    }

    /// Deep-copies the bindings; the parent link is shared, not copied.
    pub fn deep_copy(&self) -> Rc<Environment> {
        Rc::new(Environment {
            bindings: RefCell::new(self.bindings.borrow().clone()),
            parent: RefCell::new(self.parent.borrow().clone()),
        })
    }
}
