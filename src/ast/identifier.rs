use serde_json::{json, Value};

/// A bare name reference, also used for `let`/function-parameter names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn to_json(&self) -> Value {
        json!({ "type": "Identifier", "name": self.name })
    }
}
