use super::{Block, Expression};
use serde_json::{json, Value};

/// `if cond { ... } else { ... }`. Both branches are mandatory in the
/// grammar - `elf-lang` has no standalone `if` statement, only the
/// if-expression.
#[derive(Debug, Clone, PartialEq)]
pub struct If {
    pub condition: Box<Expression>,
    pub consequence: Block,
    pub alternative: Block,
}

impl If {
    pub fn to_json(&self) -> Value {
        json!({
            "type": "If",
            "condition": self.condition.to_json(),
            "consequence": self.consequence.to_json(),
            "alternative": self.alternative.to_json(),
        })
    }
}
