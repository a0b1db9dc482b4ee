use super::{Expression, Identifier};
use serde_json::{json, Value};

/// `let` and `let mut` bindings. `mutable` decides the JSON `type`
/// (`Let` vs `MutableLet`) and whether the evaluator allows later
/// assignment to this name.
#[derive(Debug, Clone, PartialEq)]
pub struct LetBinding {
    pub mutable: bool,
    pub name: Identifier,
    pub value: Box<Expression>,
}

impl LetBinding {
    pub fn to_json(&self) -> Value {
        let ty = if self.mutable { "MutableLet" } else { "Let" };
        json!({
            "type": ty,
            "name": self.name.to_json(),
            "value": self.value.to_json(),
        })
    }
}
