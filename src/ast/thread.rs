use super::Expression;
use serde_json::{json, Value};

/// A flattened `|>` pipeline: `x |> f(a) |> g` becomes
/// `initial = x, functions = [f(a), g]`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionThread {
    pub initial: Box<Expression>,
    pub functions: Vec<Expression>,
}

impl FunctionThread {
    pub fn to_json(&self) -> Value {
        json!({
            "type": "FunctionThread",
            "initial": self.initial.to_json(),
            "functions": self.functions.iter().map(Expression::to_json).collect::<Vec<_>>(),
        })
    }
}
