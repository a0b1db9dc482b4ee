use super::{Closure, Value};

/// A callable value. Partial application is represented directly as a
/// variant here (an inner function plus a captured argument prefix)
/// rather than by synthesizing AST or rebuilding a closure.
#[derive(Debug, Clone)]
pub enum FunctionValue {
    User(Closure),
    Builtin(Builtin),
    /// `f >> g >> h`, flattened by the parser into one node; applying it
    /// threads a single argument through every entry in order.
    Composed(Vec<FunctionValue>),
    Partial {
        inner: Box<FunctionValue>,
        prefix: Vec<Value>,
    },
}

impl FunctionValue {
    /// Declared parameter count, before any partial-application prefix is
    /// subtracted. `puts` has no fixed arity.
    pub fn arity(&self) -> Option<usize> {
        match self {
            FunctionValue::User(closure) => Some(closure.parameters.len()),
            FunctionValue::Builtin(b) => b.arity(),
            FunctionValue::Composed(_) => Some(1),
            FunctionValue::Partial { inner, prefix } => {
                inner.arity().map(|a| a.saturating_sub(prefix.len()))
            }
        }
    }
}

/// The fixed set of built-in functions. `Puts` is the only variadic one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Puts,
    First,
    Rest,
    Size,
    Push,
    Assoc,
    Map,
    Filter,
    Fold,
    Add,
    Sub,
    Mul,
    Div,
}

impl Builtin {
    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Puts => "puts",
            Builtin::First => "first",
            Builtin::Rest => "rest",
            Builtin::Size => "size",
            Builtin::Push => "push",
            Builtin::Assoc => "assoc",
            Builtin::Map => "map",
            Builtin::Filter => "filter",
            Builtin::Fold => "fold",
            Builtin::Add => "+",
            Builtin::Sub => "-",
            Builtin::Mul => "*",
            Builtin::Div => "/",
        }
    }

    pub fn arity(&self) -> Option<usize> {
        match self {
            Builtin::Puts => None,
            Builtin::First | Builtin::Rest | Builtin::Size => Some(1),
            Builtin::Push | Builtin::Map | Builtin::Filter | Builtin::Add | Builtin::Sub
            | Builtin::Mul | Builtin::Div => Some(2),
            Builtin::Assoc | Builtin::Fold => Some(3),
        }
    }
}
