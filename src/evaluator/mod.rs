//! Tree-walking evaluator: `Program`/`Expression` to [`Value`].
mod arithmetic;
mod builtins;

use crate::ast::{Block, Expression, Program, Statement};
use crate::environment::Environment;
use crate::error::EvalError;
use crate::value::{Closure, FunctionValue, Value};
use std::io::Write;
use std::rc::Rc;

/// A fresh global scope with every builtin and operator-function identifier
/// already bound.
pub fn global_env() -> Rc<Environment> {
    let env = Environment::root();
    use crate::value::Builtin::*;
    for b in [
        Puts, First, Rest, Size, Push, Assoc, Map, Filter, Fold, Add, Sub, Mul, Div,
    ] {
        env.define(b.name(), Value::Function(FunctionValue::Builtin(b)), false);
    }
    env
}

/// Evaluates every statement in order. The result is the value of the last
/// non-comment top-level expression, or `Nil` if there was none.
pub fn eval_program(
    program: &Program,
    env: &Rc<Environment>,
    out: &mut dyn Write,
) -> Result<Value, EvalError> {
    let mut result = Value::Nil;
    for statement in &program.statements {
        if let Statement::Expression(expr) = statement {
            result = eval_expression(expr, env, out)?;
        }
    }
    Ok(result)
}

fn eval_block(block: &Block, env: &Rc<Environment>, out: &mut dyn Write) -> Result<Value, EvalError> {
    let child = Environment::child(env);
    let mut result = Value::Nil;
    for statement in &block.statements {
        if let Statement::Expression(expr) = statement {
            result = eval_expression(expr, &child, out)?;
        }
    }
    Ok(result)
}

fn eval_expression(
    expr: &Expression,
    env: &Rc<Environment>,
    out: &mut dyn Write,
) -> Result<Value, EvalError> {
    match expr {
        Expression::Identifier(id) => env
            .get(&id.name)
            .ok_or_else(|| EvalError::IdentifierNotFound(id.name.clone())),
        Expression::Integer(lit) => Ok(Value::Integer(
            lit.value.replace('_', "").parse().expect("lexer guarantees digits"),
        )),
        Expression::Decimal(lit) => Ok(Value::Decimal(
            lit.value.replace('_', "").parse().expect("lexer guarantees digits"),
        )),
        Expression::String(lit) => Ok(Value::String(lit.value.clone())),
        Expression::Boolean(b) => Ok(Value::Boolean(*b)),
        Expression::Nil => Ok(Value::Nil),
        Expression::Let(binding) => {
            let value = eval_expression(&binding.value, env, out)?;
            env.define(binding.name.name.clone(), value, binding.mutable);
            Ok(Value::Nil)
        }
        Expression::Assignment(assignment) => {
            let value = eval_expression(&assignment.value, env, out)?;
            match env.assign(&assignment.name.name, value.clone()) {
                Ok(()) => Ok(value),
                Err(true) => Err(EvalError::NotMutable(assignment.name.name.clone())),
                Err(false) => Err(EvalError::IdentifierNotFound(assignment.name.name.clone())),
            }
        }
        Expression::Infix(infix) => eval_infix(infix, env, out),
        Expression::Prefix(prefix) => {
            let operand = eval_expression(&prefix.operand, env, out)?;
            arithmetic::negate(operand)
        }
        Expression::List(items) => {
            let values = items
                .iter()
                .map(|i| eval_expression(i, env, out))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::List(values))
        }
        Expression::Set(items) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                let v = eval_expression(item, env, out)?;
                if matches!(v, Value::Dictionary(_)) {
                    return Err(EvalError::DictionaryInSet);
                }
                values.push(v);
            }
            Ok(Value::Set(crate::value::normalize_set(values)))
        }
        Expression::Dictionary(entries) => {
            let mut values = Vec::with_capacity(entries.len());
            for (k, v) in entries {
                let key = eval_expression(k, env, out)?;
                if matches!(key, Value::Dictionary(_)) {
                    return Err(EvalError::DictionaryAsKey);
                }
                let value = eval_expression(v, env, out)?;
                values.push((key, value));
            }
            Ok(Value::Dictionary(crate::value::normalize_dict(values)))
        }
        Expression::Index(index) => eval_index(index, env, out),
        Expression::If(if_expr) => {
            let condition = eval_expression(&if_expr.condition, env, out)?;
            if condition.is_truthy() {
                eval_block(&if_expr.consequence, env, out)
            } else {
                eval_block(&if_expr.alternative, env, out)
            }
        }
        Expression::Function(literal) => Ok(Value::Function(FunctionValue::User(Closure {
            parameters: literal.parameters.iter().map(|p| p.name.clone()).collect(),
            body: Rc::new(literal.body.clone()),
            env: Rc::clone(env),
        }))),
        Expression::Call(call) => {
            let callee = eval_expression(&call.function, env, out)?;
            let Value::Function(function) = callee else {
                return Err(EvalError::NotAFunction(callee.type_name()));
            };
            let args = call
                .arguments
                .iter()
                .map(|a| eval_expression(a, env, out))
                .collect::<Result<Vec<_>, _>>()?;
            apply(&function, args, out)
        }
        Expression::FunctionComposition(parts) => {
            let functions = parts
                .iter()
                .map(|p| {
                    let v = eval_expression(p, env, out)?;
                    match v {
                        Value::Function(f) => Ok(f),
                        other => Err(EvalError::NotAFunction(other.type_name())),
                    }
                })
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Value::Function(FunctionValue::Composed(functions)))
        }
        Expression::FunctionThread(thread) => {
            let mut value = eval_expression(&thread.initial, env, out)?;
            for step in &thread.functions {
                value = eval_thread_step(step, value, env, out)?;
            }
            Ok(value)
        }
    }
}

/// A `|>` step: a bare `Call` node gets the threaded value appended as its
/// last argument; anything else is evaluated to a function and called with
/// the threaded value as its sole argument.
fn eval_thread_step(
    step: &Expression,
    threaded: Value,
    env: &Rc<Environment>,
    out: &mut dyn Write,
) -> Result<Value, EvalError> {
    if let Expression::Call(call) = step {
        let callee = eval_expression(&call.function, env, out)?;
        let Value::Function(function) = callee else {
            return Err(EvalError::NotAFunction(callee.type_name()));
        };
        let mut args = call
            .arguments
            .iter()
            .map(|a| eval_expression(a, env, out))
            .collect::<Result<Vec<_>, _>>()?;
        args.push(threaded);
        apply(&function, args, out)
    } else {
        let callee = eval_expression(step, env, out)?;
        let Value::Function(function) = callee else {
            return Err(EvalError::NotAFunction(callee.type_name()));
        };
        apply(&function, vec![threaded], out)
    }
}

fn eval_infix(infix: &crate::ast::Infix, env: &Rc<Environment>, out: &mut dyn Write) -> Result<Value, EvalError> {
    // `&&`/`||` short-circuit and always yield a Boolean, regardless of
    // operand type.
    match infix.operator.as_str() {
        "&&" => {
            let left = eval_expression(&infix.left, env, out)?;
            if !left.is_truthy() {
                return Ok(Value::Boolean(false));
            }
            let right = eval_expression(&infix.right, env, out)?;
            return Ok(Value::Boolean(right.is_truthy()));
        }
        "||" => {
            let left = eval_expression(&infix.left, env, out)?;
            if left.is_truthy() {
                return Ok(Value::Boolean(true));
            }
            let right = eval_expression(&infix.right, env, out)?;
            return Ok(Value::Boolean(right.is_truthy()));
        }
        _ => {}
    }

    let left = eval_expression(&infix.left, env, out)?;
    let right = eval_expression(&infix.right, env, out)?;
    arithmetic::apply_operator(&infix.operator, left, right)
}

fn eval_index(index: &crate::ast::Index, env: &Rc<Environment>, out: &mut dyn Write) -> Result<Value, EvalError> {
    let left = eval_expression(&index.left, env, out)?;
    let idx = eval_expression(&index.index, env, out)?;
    match &left {
        Value::List(items) => index_sequence(items.len(), &idx, "List")
            .map(|i| i.map_or(Value::Nil, |i| items[i].clone())),
        Value::String(s) => {
            let chars: Vec<char> = s.chars().collect();
            index_sequence(chars.len(), &idx, "String")
                .map(|i| i.map_or(Value::Nil, |i| Value::String(chars[i].to_string())))
        }
        Value::Dictionary(entries) => {
            if matches!(idx, Value::Dictionary(_)) {
                return Err(EvalError::DictionaryAsKey);
            }
            Ok(entries
                .iter()
                .find(|(k, _)| *k == idx)
                .map(|(_, v)| v.clone())
                .unwrap_or(Value::Nil))
        }
        other => Err(EvalError::IndexUnsupported {
            container: other.type_name(),
            index: idx.type_name(),
        }),
    }
}

/// Resolves a List/String index: negative indices count from the end,
/// out-of-range yields `None` (caller maps that to `Nil`).
fn index_sequence(len: usize, idx: &Value, container: &'static str) -> Result<Option<usize>, EvalError> {
    let Value::Integer(i) = idx else {
        return Err(EvalError::IndexUnsupported {
            container,
            index: idx.type_name(),
        });
    };
    let len = len as i64;
    let effective = if *i < 0 { len + i } else { *i };
    if effective < 0 || effective >= len {
        Ok(None)
    } else {
        Ok(Some(effective as usize))
    }
}

/// Invokes a callable. Partial application is uniform across user
/// functions, builtins and compositions: if fewer arguments are supplied
/// than the declared arity, a `Partial` value is returned instead of
/// executing the body.
pub(crate) fn apply(
    function: &FunctionValue,
    mut args: Vec<Value>,
    out: &mut dyn Write,
) -> Result<Value, EvalError> {
    if let FunctionValue::Partial { inner, prefix } = function {
        let mut combined = prefix.clone();
        combined.append(&mut args);
        return apply(inner, combined, out);
    }

    if let Some(k) = function.arity() {
        if args.len() < k {
            return Ok(Value::Function(FunctionValue::Partial {
                inner: Box::new(function.clone()),
                prefix: args,
            }));
        }
        args.truncate(k);
    }

    match function {
        FunctionValue::Partial { .. } => unreachable!("handled above"),
        FunctionValue::User(closure) => {
            let child = Environment::child(&closure.env);
            for (name, value) in closure.parameters.iter().zip(args) {
                child.define(name.clone(), value, false);
            }
            eval_block(&closure.body, &child, out)
        }
        FunctionValue::Builtin(b) => builtins::call(*b, args, out),
        FunctionValue::Composed(fns) => {
            let mut value = args.into_iter().next().unwrap_or(Value::Nil);
            for f in fns {
                value = apply(f, vec![value], out)?;
            }
            Ok(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;
    use crate::parser;

    fn run(source: &str) -> (Value, String) {
        let tokens = Lexer::new(source).lex();
        let program = parser::parse(tokens).expect("parse failure");
        let env = global_env();
        let mut out = Vec::new();
        let value = eval_program(&program, &env, &mut out).expect("eval failure");
        (value, String::from_utf8(out).unwrap())
    }

    fn run_err(source: &str) -> EvalError {
        let tokens = Lexer::new(source).lex();
        let program = parser::parse(tokens).expect("parse failure");
        let env = global_env();
        let mut out = Vec::new();
        eval_program(&program, &env, &mut out).expect_err("expected eval error")
    }

    #[test]
    fn mutation_and_puts() {
        let (value, stdout) = run("let mut y = 10; y = 20; puts(y)");
        assert_eq!(value, Value::Nil);
        assert_eq!(stdout, "20 \n");
    }

    #[test]
    fn recursive_factorial() {
        let (value, _) = run("let f = |n| if n <= 1 { 1 } else { n * f(n - 1) }; f(5)");
        assert_eq!(value, Value::Integer(120));
    }

    #[test]
    fn thread_then_filter() {
        let (value, _) = run("[1,2,3,4,5] |> map(|x| x * 2) |> filter(|x| x > 5)");
        assert_eq!(
            value,
            Value::List(vec![Value::Integer(6), Value::Integer(8), Value::Integer(10)])
        );
    }

    #[test]
    fn composition_is_left_to_right() {
        let (value, _) = run("let add = |x,y| x + y; let double = |x| x * 2; (add(1) >> double)(5)");
        assert_eq!(value, Value::Integer(12));
    }

    #[test]
    fn dictionary_merge_is_right_biased() {
        let (value, _) = run(r#"#{"a": 1} + #{"a": 2, "b": 3}"#);
        assert_eq!(value.repr(), r#"#{"a": 2, "b": 3}"#);
    }

    #[test]
    fn set_literal_sorts_and_dedups() {
        let (value, _) = run("{3,1,2,2}");
        assert_eq!(value.repr(), "{1, 2, 3}");
    }

    #[test]
    fn negative_string_repeat_errors() {
        let err = run_err("\"a\" * -1");
        assert_eq!(err.to_string(), "Unsupported operation: String * Integer (< 0)");
    }

    #[test]
    fn assignment_to_immutable_errors() {
        let err = run_err("let x = 1; x = 2");
        assert_eq!(err.to_string(), "Variable 'x' is not mutable");
    }

    #[test]
    fn closure_mutation_is_shared() {
        let (value, _) = run("let mut c = 0; let bump = || { c = c + 1; c }; bump(); bump()");
        assert_eq!(value, Value::Integer(2));
    }

    #[test]
    fn partial_application_via_operator_function() {
        let (value, _) = run("fold(0, +, [1,2,3,4])");
        assert_eq!(value, Value::Integer(10));
    }
}
