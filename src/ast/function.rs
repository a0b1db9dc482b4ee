use super::{Block, Identifier};
use serde_json::{json, Value};

/// A function literal, e.g. `|x, y| x + y` or `|| 42`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionLiteral {
    pub parameters: Vec<Identifier>,
    pub body: Block,
}

impl FunctionLiteral {
    pub fn to_json(&self) -> Value {
        json!({
            "type": "Function",
            "parameters": self.parameters.iter().map(Identifier::to_json).collect::<Vec<_>>(),
            "body": self.body.to_json(),
        })
    }
}
