use super::Expression;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Index {
    pub left: Box<Expression>,
    pub index: Box<Expression>,
}

impl Index {
    pub fn to_json(&self) -> Value {
        json!({
            "type": "Index",
            "left": self.left.to_json(),
            "index": self.index.to_json(),
        })
    }
}
