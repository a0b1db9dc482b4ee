//! Error types shared by the parser and the evaluator.
use std::fmt::Display;

/// A runtime error raised while evaluating a program.
///
/// `Display` renders exactly the message text specified for each error
/// kind; callers that need the `[Error] ` prefix add it themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    IdentifierNotFound(String),
    NotMutable(String),
    UnsupportedBinary {
        left: &'static str,
        op: String,
        right: &'static str,
    },
    UnsupportedUnary {
        op: String,
        operand: &'static str,
    },
    NegativeRepeat,
    StringTimesDecimal,
    DivisionByZero,
    IndexUnsupported {
        container: &'static str,
        index: &'static str,
    },
    DictionaryAsKey,
    DictionaryInSet,
    NotAFunction(&'static str),
    UnexpectedArgument { func: &'static str, ty: &'static str },
}

impl Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IdentifierNotFound(name) => {
                write!(f, "Identifier can not be found: {name}")
            }
            Self::NotMutable(name) => write!(f, "Variable '{name}' is not mutable"),
            Self::UnsupportedBinary { left, op, right } => {
                write!(f, "Unsupported operation: {left} {op} {right}")
            }
            Self::UnsupportedUnary { op, operand } => {
                write!(f, "Unsupported operation: {op} {operand}")
            }
            Self::NegativeRepeat => {
                write!(f, "Unsupported operation: String * Integer (< 0)")
            }
            Self::StringTimesDecimal => {
                write!(f, "Unsupported operation: String * Decimal")
            }
            Self::DivisionByZero => write!(f, "Division by zero"),
            Self::IndexUnsupported { container, index } => write!(
                f,
                "Unable to perform index operation, found: {container}[{index}]"
            ),
            Self::DictionaryAsKey => {
                write!(f, "Unable to use a Dictionary as a Dictionary key")
            }
            Self::DictionaryInSet => {
                write!(f, "Unable to include a Dictionary within a Set")
            }
            Self::NotAFunction(ty) => write!(f, "Expected a Function, found: {ty}"),
            Self::UnexpectedArgument { func, ty } => {
                write!(f, "Unexpected argument: {func}({ty}, \u{2026})")
            }
        }
    }
}

impl std::error::Error for EvalError {}
