use std::{cell::RefCell, collections::HashMap, rc::Rc};

use tracing::debug;

use super::prelude::Object;

/// Name bindings of one scope, chained to the scope that encloses it.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct Environment {
    pub store: HashMap<String, Object>,
    pub outer: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Self {
            store: HashMap::new(),
            outer: None,
        }
    }

    /// Root scope wrapped for sharing between evaluation frames.
    pub fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::new()))
    }

    /// Fresh scope whose lookups fall back to `outer`.
    pub fn new_enclosed(outer: Rc<RefCell<Environment>>) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            store: HashMap::new(),
            outer: Some(outer),
        }))
    }

    /// Looks `name` up in this scope, then outward through enclosing scopes.
    pub fn get(&self, name: &str) -> Option<Object> {
        match self.store.get(name) {
            Some(value) => Some(value.clone()),
            None => self.outer.as_ref()
                .and_then(|outer| outer.borrow().get(name)),
        }
    }

    /// Binds `name` in this scope only; an outer binding of the same name is
    /// shadowed, never overwritten.
    pub fn set(&mut self, name: String, value: Object) {
        debug!(%name, %value, "bind");

        self.store.insert(name, value);
    }
}
