use super::apply;
use crate::error::EvalError;
use crate::value::{normalize_dict, normalize_set, Builtin, Value};
use std::io::Write;

/// Dispatches a builtin call. `args` has already been truncated to the
/// builtin's declared arity by [`super::apply`] (except for `puts`, which
/// is variadic).
pub fn call(builtin: Builtin, args: Vec<Value>, out: &mut dyn Write) -> Result<Value, EvalError> {
    match builtin {
        Builtin::Puts => puts(&args, out),
        Builtin::First => first(args),
        Builtin::Rest => rest(args),
        Builtin::Size => size(args),
        Builtin::Push => push(args),
        Builtin::Assoc => assoc(args),
        Builtin::Map => map(args, out),
        Builtin::Filter => filter(args, out),
        Builtin::Fold => fold(args, out),
        Builtin::Add => {
            let (left, right) = take2(args);
            super::arithmetic::apply_operator("+", left, right)
        }
        Builtin::Sub => {
            let (left, right) = take2(args);
            super::arithmetic::apply_operator("-", left, right)
        }
        Builtin::Mul => {
            let (left, right) = take2(args);
            super::arithmetic::apply_operator("*", left, right)
        }
        Builtin::Div => {
            let (left, right) = take2(args);
            super::arithmetic::apply_operator("/", left, right)
        }
    }
}

fn take2(mut args: Vec<Value>) -> (Value, Value) {
    let right = args.pop().expect("arity already checked");
    let left = args.pop().expect("arity already checked");
    (left, right)
}

fn puts(args: &[Value], out: &mut dyn Write) -> Result<Value, EvalError> {
    let rendered = args.iter().map(Value::repr).collect::<Vec<_>>().join(" ");
    let _ = write!(out, "{rendered} \n");
    Ok(Value::Nil)
}

fn first(mut args: Vec<Value>) -> Result<Value, EvalError> {
    match args.remove(0) {
        Value::List(items) => Ok(items.into_iter().next().unwrap_or(Value::Nil)),
        other => Err(unexpected("first", &other)),
    }
}

fn rest(mut args: Vec<Value>) -> Result<Value, EvalError> {
    match args.remove(0) {
        Value::List(items) => Ok(Value::List(items.into_iter().skip(1).collect())),
        other => Err(unexpected("rest", &other)),
    }
}

fn size(mut args: Vec<Value>) -> Result<Value, EvalError> {
    match args.remove(0) {
        Value::String(s) => Ok(Value::Integer(s.len() as i64)),
        Value::List(items) => Ok(Value::Integer(items.len() as i64)),
        Value::Set(items) => Ok(Value::Integer(items.len() as i64)),
        Value::Dictionary(entries) => Ok(Value::Integer(entries.len() as i64)),
        other => Err(unexpected("size", &other)),
    }
}

fn push(mut args: Vec<Value>) -> Result<Value, EvalError> {
    let coll = args.remove(1);
    let value = args.remove(0);
    match coll {
        Value::List(mut items) => {
            items.push(value);
            Ok(Value::List(items))
        }
        Value::Set(items) => {
            let mut items = items;
            items.push(value);
            Ok(Value::Set(normalize_set(items)))
        }
        other => Err(unexpected("push", &other)),
    }
}

fn assoc(mut args: Vec<Value>) -> Result<Value, EvalError> {
    let dict = args.remove(2);
    let value = args.remove(1);
    let key = args.remove(0);
    match dict {
        Value::Dictionary(entries) => {
            if matches!(key, Value::Dictionary(_)) {
                return Err(EvalError::DictionaryAsKey);
            }
            let mut entries = entries;
            entries.push((key, value));
            Ok(Value::Dictionary(normalize_dict(entries)))
        }
        other => Err(unexpected("assoc", &other)),
    }
}

fn map(mut args: Vec<Value>, out: &mut dyn Write) -> Result<Value, EvalError> {
    let list = args.remove(1);
    let func = args.remove(0);
    let (Value::Function(f), Value::List(items)) = (&func, &list) else {
        let offending = if matches!(func, Value::Function(_)) { &list } else { &func };
        return Err(unexpected("map", offending));
    };
    let mapped = items
        .iter()
        .map(|item| apply(f, vec![item.clone()], out))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Value::List(mapped))
}

fn filter(mut args: Vec<Value>, out: &mut dyn Write) -> Result<Value, EvalError> {
    let list = args.remove(1);
    let func = args.remove(0);
    let (Value::Function(f), Value::List(items)) = (&func, &list) else {
        let offending = if matches!(func, Value::Function(_)) { &list } else { &func };
        return Err(unexpected("filter", offending));
    };
    let mut kept = Vec::new();
    for item in items {
        if apply(f, vec![item.clone()], out)?.is_truthy() {
            kept.push(item.clone());
        }
    }
    Ok(Value::List(kept))
}

fn fold(mut args: Vec<Value>, out: &mut dyn Write) -> Result<Value, EvalError> {
    let list = args.remove(2);
    let func = args.remove(1);
    let init = args.remove(0);
    let (Value::Function(f), Value::List(items)) = (&func, &list) else {
        let offending = if matches!(func, Value::Function(_)) { &list } else { &func };
        return Err(unexpected("fold", offending));
    };
    let mut acc = init;
    for item in items {
        acc = apply(f, vec![acc, item.clone()], out)?;
    }
    Ok(acc)
}

fn unexpected(func: &'static str, ty: &Value) -> EvalError {
    EvalError::UnexpectedArgument {
        func,
        ty: ty.type_name(),
    }
}
