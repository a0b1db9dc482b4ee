use serde_json::{json, Value};

/// An integer literal. `value` is the verbatim source slice (underscores
/// preserved); parsing to an `i64` happens in the evaluator, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegerLiteral {
    pub value: String,
}

impl IntegerLiteral {
    pub fn to_json(&self) -> Value {
        json!({ "type": "Integer", "value": self.value })
    }
}

/// A decimal literal, same slice-preserving treatment as `IntegerLiteral`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecimalLiteral {
    pub value: String,
}

impl DecimalLiteral {
    pub fn to_json(&self) -> Value {
        json!({ "type": "Decimal", "value": self.value })
    }
}

/// A string literal, already unquoted and unescaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringLiteral {
    pub value: String,
}

impl StringLiteral {
    pub fn to_json(&self) -> Value {
        json!({ "type": "String", "value": self.value })
    }
}
