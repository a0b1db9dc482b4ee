//! Lexical scopes as a chain of environments, with bindings kept in
//! reference-counted cells so closures can alias (and mutate) the scope
//! they were defined in.
use crate::value::Value;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

struct Cell {
    value: RefCell<Value>,
    mutable: bool,
}

pub struct Environment {
    bindings: RefCell<HashMap<String, Rc<Cell>>>,
    parent: Option<Rc<Environment>>,
}

impl Environment {
    pub fn root() -> Rc<Self> {
        Rc::new(Self {
            bindings: RefCell::new(HashMap::new()),
            parent: None,
        })
    }

    pub fn child(parent: &Rc<Environment>) -> Rc<Self> {
        Rc::new(Self {
            bindings: RefCell::new(HashMap::new()),
            parent: Some(Rc::clone(parent)),
        })
    }

    /// Introduces a new binding in this scope, shadowing any binding of the
    /// same name in a parent scope.
    pub fn define(&self, name: impl Into<String>, value: Value, mutable: bool) {
        self.bindings.borrow_mut().insert(
            name.into(),
            Rc::new(Cell {
                value: RefCell::new(value),
                mutable,
            }),
        );
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(cell) = self.bindings.borrow().get(name) {
            return Some(cell.value.borrow().clone());
        }
        self.parent.as_ref().and_then(|p| p.get(name))
    }

    fn find_cell(&self, name: &str) -> Option<Rc<Cell>> {
        if let Some(cell) = self.bindings.borrow().get(name) {
            return Some(Rc::clone(cell));
        }
        self.parent.as_ref().and_then(|p| p.find_cell(name))
    }

    /// `Ok(())` on success. `Err(true)` means the name exists but is not
    /// mutable; `Err(false)` means the name doesn't resolve at all.
    pub fn assign(&self, name: &str, value: Value) -> Result<(), bool> {
        match self.find_cell(name) {
            Some(cell) if cell.mutable => {
                *cell.value.borrow_mut() = value;
                Ok(())
            }
            Some(_) => Err(true),
            None => Err(false),
        }
    }
}
