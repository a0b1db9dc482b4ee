use super::Expression;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
}

impl Call {
    pub fn to_json(&self) -> Value {
        json!({
            "type": "Call",
            "function": self.function.to_json(),
            "arguments": self.arguments.iter().map(Expression::to_json).collect::<Vec<_>>(),
        })
    }
}
