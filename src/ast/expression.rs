use super::{
    Assignment, Call, DecimalLiteral, FunctionLiteral, FunctionThread, Identifier, If, Index,
    Infix, IntegerLiteral, LetBinding, Prefix, StringLiteral,
};
use serde_json::{json, Value};

/// Every `elf-lang` expression. Printing goes through [`Expression::to_json`],
/// which always produces an object whose keys land in lexicographic order
/// thanks to `serde_json::Map`'s default `BTreeMap` backing.
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    Integer(IntegerLiteral),
    Decimal(DecimalLiteral),
    String(StringLiteral),
    Boolean(bool),
    Nil,
    Let(LetBinding),
    Assignment(Assignment),
    Infix(Infix),
    Prefix(Prefix),
    List(Vec<Expression>),
    Set(Vec<Expression>),
    Dictionary(Vec<(Expression, Expression)>),
    Index(Index),
    If(If),
    Function(FunctionLiteral),
    Call(Call),
    FunctionComposition(Vec<Expression>),
    FunctionThread(FunctionThread),
}

impl Expression {
    pub fn to_json(&self) -> Value {
        match self {
            Expression::Identifier(id) => id.to_json(),
            Expression::Integer(i) => i.to_json(),
            Expression::Decimal(d) => d.to_json(),
            Expression::String(s) => s.to_json(),
            Expression::Boolean(b) => json!({ "type": "Boolean", "value": b }),
            Expression::Nil => json!({ "type": "Nil" }),
            Expression::Let(l) => l.to_json(),
            Expression::Assignment(a) => a.to_json(),
            Expression::Infix(i) => i.to_json(),
            Expression::Prefix(p) => p.to_json(),
            Expression::List(items) => json!({
                "type": "List",
                "items": items.iter().map(Expression::to_json).collect::<Vec<_>>(),
            }),
            Expression::Set(items) => json!({
                "type": "Set",
                "items": items.iter().map(Expression::to_json).collect::<Vec<_>>(),
            }),
            Expression::Dictionary(items) => json!({
                "type": "Dictionary",
                "items": items
                    .iter()
                    .map(|(k, v)| json!({ "key": k.to_json(), "value": v.to_json() }))
                    .collect::<Vec<_>>(),
            }),
            Expression::Index(i) => i.to_json(),
            Expression::If(i) => i.to_json(),
            Expression::Function(f) => f.to_json(),
            Expression::Call(c) => c.to_json(),
            Expression::FunctionComposition(fns) => json!({
                "type": "FunctionComposition",
                "functions": fns.iter().map(Expression::to_json).collect::<Vec<_>>(),
            }),
            Expression::FunctionThread(t) => t.to_json(),
        }
    }
}
