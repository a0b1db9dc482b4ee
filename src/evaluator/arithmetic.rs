//! Arithmetic, string/collection combination and comparison semantics for
//! infix operators. Operator-functions (`+ - * /` used as bare values)
//! dispatch through [`apply_operator`] too, so both call sites agree.
use crate::error::EvalError;
use crate::value::{normalize_dict, normalize_set, promote, Promoted, Value};

pub fn apply_operator(op: &str, left: Value, right: Value) -> Result<Value, EvalError> {
    match op {
        "+" => add(left, right),
        "-" => sub(left, right),
        "*" => mul(left, right),
        "/" => div(left, right),
        "==" => Ok(Value::Boolean(compare(&left, op, &right)? == std::cmp::Ordering::Equal)),
        "!=" => Ok(Value::Boolean(compare(&left, op, &right)? != std::cmp::Ordering::Equal)),
        ">" => Ok(Value::Boolean(compare(&left, op, &right)? == std::cmp::Ordering::Greater)),
        "<" => Ok(Value::Boolean(compare(&left, op, &right)? == std::cmp::Ordering::Less)),
        ">=" => Ok(Value::Boolean(compare(&left, op, &right)? != std::cmp::Ordering::Less)),
        "<=" => Ok(Value::Boolean(compare(&left, op, &right)? != std::cmp::Ordering::Greater)),
        other => unreachable!("parser never produces infix operator '{other}'"),
    }
}

pub fn negate(operand: Value) -> Result<Value, EvalError> {
    match operand {
        Value::Integer(i) => Ok(Value::Integer(-i)),
        Value::Decimal(d) => Ok(Value::Decimal(-d)),
        other => Err(EvalError::UnsupportedUnary {
            op: "-".to_string(),
            operand: other.type_name(),
        }),
    }
}

fn add(left: Value, right: Value) -> Result<Value, EvalError> {
    if let Some(p) = promote(&left, &right) {
        return Ok(match p {
            Promoted::Int(a, b) => Value::Integer(a + b),
            Promoted::Dec(a, b) => Value::Decimal(a + b),
        });
    }
    match (&left, &right) {
        (Value::String(a), Value::String(b)) => Ok(Value::String(format!("{a}{b}"))),
        (Value::String(a), other) => Ok(Value::String(format!("{a}{}", other.repr()))),
        (other, Value::String(b)) => Ok(Value::String(format!("{}{b}", other.repr()))),
        (Value::List(a), Value::List(b)) => {
            let mut items = a.clone();
            items.extend(b.clone());
            Ok(Value::List(items))
        }
        (Value::Set(a), Value::Set(b)) => {
            let mut items = a.clone();
            items.extend(b.clone());
            Ok(Value::Set(normalize_set(items)))
        }
        (Value::Dictionary(a), Value::Dictionary(b)) => {
            let mut entries = a.clone();
            entries.extend(b.clone());
            Ok(Value::Dictionary(normalize_dict(entries)))
        }
        _ => Err(unsupported_binary(&left, "+", &right)),
    }
}

fn sub(left: Value, right: Value) -> Result<Value, EvalError> {
    match promote(&left, &right) {
        Some(Promoted::Int(a, b)) => Ok(Value::Integer(a - b)),
        Some(Promoted::Dec(a, b)) => Ok(Value::Decimal(a - b)),
        None => Err(unsupported_binary(&left, "-", &right)),
    }
}

fn mul(left: Value, right: Value) -> Result<Value, EvalError> {
    if let Some(p) = promote(&left, &right) {
        return Ok(match p {
            Promoted::Int(a, b) => Value::Integer(a * b),
            Promoted::Dec(a, b) => Value::Decimal(a * b),
        });
    }
    match (&left, &right) {
        (Value::String(s), Value::Integer(n)) | (Value::Integer(n), Value::String(s)) => {
            if *n < 0 {
                Err(EvalError::NegativeRepeat)
            } else {
                Ok(Value::String(s.repeat(*n as usize)))
            }
        }
        (Value::String(_), Value::Decimal(_)) | (Value::Decimal(_), Value::String(_)) => {
            Err(EvalError::StringTimesDecimal)
        }
        _ => Err(unsupported_binary(&left, "*", &right)),
    }
}

fn div(left: Value, right: Value) -> Result<Value, EvalError> {
    match promote(&left, &right) {
        Some(Promoted::Int(_, 0)) => Err(EvalError::DivisionByZero),
        Some(Promoted::Int(a, b)) => Ok(Value::Integer(a / b)),
        Some(Promoted::Dec(_, b)) if b == 0.0 => Err(EvalError::DivisionByZero),
        Some(Promoted::Dec(a, b)) => Ok(Value::Decimal(a / b)),
        None => Err(unsupported_binary(&left, "/", &right)),
    }
}

/// Numeric and string comparison only; every other type pairing is a
/// runtime error, matching the spec's narrower rule for `== != > < >= <=`
/// (as opposed to the broader structural equality used for Set/Dictionary
/// deduplication and ordering).
fn compare(left: &Value, op: &str, right: &Value) -> Result<std::cmp::Ordering, EvalError> {
    if let Some(p) = promote(left, right) {
        return Ok(match p {
            Promoted::Int(a, b) => a.cmp(&b),
            Promoted::Dec(a, b) => a.total_cmp(&b),
        });
    }
    if let (Value::String(a), Value::String(b)) = (left, right) {
        return Ok(a.cmp(b));
    }
    Err(unsupported_binary(left, op, right))
}

fn unsupported_binary(left: &Value, op: &str, right: &Value) -> EvalError {
    EvalError::UnsupportedBinary {
        left: left.type_name(),
        op: op.to_string(),
        right: right.type_name(),
    }
}
