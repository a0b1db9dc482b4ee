use super::Statement;
use serde_json::{json, Value};

/// A sequence of statements evaluated for their side effects, whose value
/// is that of the last non-comment statement (or `Nil` if empty).
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub statements: Vec<Statement>,
}

impl Block {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "type": "Block",
            "statements": self.statements.iter().map(Statement::to_json).collect::<Vec<_>>(),
        })
    }
}
