use super::{Expression, Identifier};
use serde_json::{json, Value};

/// Reassignment of an existing (mutable) binding.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub name: Identifier,
    pub value: Box<Expression>,
}

impl Assignment {
    pub fn to_json(&self) -> Value {
        json!({
            "type": "Assignment",
            "name": self.name.to_json(),
            "value": self.value.to_json(),
        })
    }
}
