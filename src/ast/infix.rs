use super::Expression;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Infix {
    pub left: Box<Expression>,
    pub operator: String,
    pub right: Box<Expression>,
}

impl Infix {
    pub fn to_json(&self) -> Value {
        json!({
            "type": "Infix",
            "left": self.left.to_json(),
            "operator": self.operator,
            "right": self.right.to_json(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prefix {
    pub operator: String,
    pub operand: Box<Expression>,
}

impl Prefix {
    pub fn to_json(&self) -> Value {
        json!({
            "type": "Prefix",
            "operator": self.operator,
            "operand": self.operand.to_json(),
        })
    }
}
