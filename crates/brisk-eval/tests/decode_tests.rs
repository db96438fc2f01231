//! Tests for decoding JSON-shaped ASTs and running them.

use brisk_eval::decode::{decode_expr, decode_program, decode_program_str, decode_stmt};
use brisk_eval::{eval_expression, eval_program, EvalError, NullSink, ScopeChain};
use brisk_types::ast::{BinOp, ExprKind, Stmt};
use brisk_types::{Bindings, Value};
use serde_json::{json, Value as Json};

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

fn num(n: f64) -> Json {
    json!({ "kind": "number", "value": n })
}

fn boolean(b: bool) -> Json {
    json!({ "kind": "boolean", "value": b })
}

fn var(name: &str) -> Json {
    json!({ "kind": "variable", "name": name })
}

fn op(op: &str, e1: Json, e2: Json) -> Json {
    json!({ "kind": "operator", "op": op, "e1": e1, "e2": e2 })
}

fn run_json(program: Json) -> Bindings {
    let program = decode_program(&program).expect("decode failed");
    eval_program(&program, &mut NullSink).expect("runtime error")
}

fn x_is(n: f64) -> Bindings {
    Bindings::from([("x".to_string(), Value::Number(n))])
}

// ══════════════════════════════════════════════════════════════════════════════
// Well-formed programs
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn expression_with_variable() {
    let expr = decode_expr(&op("*", var("x"), num(2.0))).unwrap();
    let chain = ScopeChain::with_root(x_is(10.0));
    assert_eq!(
        eval_expression(&chain, chain.root(), &expr),
        Ok(Value::Number(20.0))
    );
}

#[test]
fn every_operator_symbol_decodes() {
    for bin in BinOp::ALL {
        let expr = decode_expr(&op(bin.as_str(), var("a"), var("b"))).unwrap();
        assert!(matches!(expr.kind, ExprKind::Binary { op, .. } if op == bin));
    }
}

#[test]
fn simple_if_program() {
    let program = json!([
        { "kind": "let", "name": "x", "expression": num(10.0) },
        {
            "kind": "if",
            "test": op(">", var("x"), num(5.0)),
            "truePart": [
                { "kind": "assignment", "name": "x", "expression": num(5.0) },
                { "kind": "let", "name": "x", "expression": num(2.0) }
            ],
            "falsePart": []
        }
    ]);
    assert_eq!(run_json(program), x_is(5.0));
}

#[test]
fn while_with_assignment() {
    let program = json!([
        { "kind": "let", "name": "x", "expression": num(10.0) },
        {
            "kind": "while",
            "test": op(">", var("x"), num(0.0)),
            "body": [
                { "kind": "assignment", "name": "x", "expression": op("-", var("x"), num(1.0)) }
            ]
        }
    ]);
    assert_eq!(run_json(program), x_is(0.0));
}

#[test]
fn nested_while_loops() {
    let inner = json!({
        "kind": "while",
        "test": op(">", var("x"), num(0.0)),
        "body": [
            { "kind": "assignment", "name": "x", "expression": op("-", var("x"), num(1.0)) }
        ]
    });
    let program = json!([
        { "kind": "let", "name": "x", "expression": num(10.0) },
        { "kind": "while", "test": op(">", var("x"), num(0.0)), "body": [inner] }
    ]);
    assert_eq!(run_json(program), x_is(0.0));
}

#[test]
fn print_and_boolean_literals() {
    let program = decode_program(&json!([
        { "kind": "print", "expression": boolean(true) },
        { "kind": "print", "expression": op("||", boolean(false), boolean(false)) }
    ]))
    .unwrap();
    let mut printed: Vec<Value> = Vec::new();
    eval_program(&program, &mut printed).unwrap();
    assert_eq!(printed, vec![Value::Boolean(true), Value::Boolean(false)]);
}

#[test]
fn decode_from_text() {
    let program = decode_program_str(
        r#"[{"kind": "let", "name": "x", "expression": {"kind": "number", "value": 3}}]"#,
    )
    .unwrap();
    assert!(matches!(program.stmts[0], Stmt::Let(_)));
}

// ══════════════════════════════════════════════════════════════════════════════
// Malformed input
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn non_object_expression() {
    let err = decode_stmt(&json!({ "kind": "assignment", "name": "x", "expression": 10 }));
    assert_eq!(
        err,
        Err(EvalError::InvalidExpression(
            "expected an expression object, got 10".into()
        ))
    );
}

#[test]
fn non_string_name() {
    let err = decode_stmt(&json!({ "kind": "assignment", "name": 1, "expression": 10 }));
    assert_eq!(
        err,
        Err(EvalError::InvalidName("variable names must be strings, got 1".into()))
    );
}

#[test]
fn missing_name() {
    assert!(matches!(
        decode_stmt(&json!({ "kind": "let", "expression": num(1.0) })),
        Err(EvalError::InvalidName(_))
    ));
    assert!(matches!(
        decode_expr(&json!({ "kind": "variable" })),
        Err(EvalError::InvalidName(_))
    ));
}

#[test]
fn unknown_statement_kind() {
    assert_eq!(
        decode_stmt(&json!({ "kind": "test", "name": "x", "expression": 10 })),
        Err(EvalError::InvalidStatement(
            "unknown statement kind \"test\"".into()
        ))
    );
}

#[test]
fn unknown_expression_kind() {
    assert_eq!(
        decode_expr(&json!({ "kind": "test", "name": "x", "expression": 10 })),
        Err(EvalError::InvalidExpression(
            "unknown expression kind \"test\"".into()
        ))
    );
}

#[test]
fn unknown_operator() {
    assert_eq!(
        decode_expr(&op("%", num(1.0), num(2.0))),
        Err(EvalError::InvalidExpression("unknown operator \"%\"".into()))
    );
    assert!(matches!(
        decode_expr(&op("==", num(1.0), num(1.0))),
        Err(EvalError::InvalidExpression(_))
    ));
}

#[test]
fn ill_typed_literals() {
    assert!(matches!(
        decode_expr(&json!({ "kind": "number", "value": "ten" })),
        Err(EvalError::InvalidExpression(_))
    ));
    assert!(matches!(
        decode_expr(&json!({ "kind": "boolean", "value": 1 })),
        Err(EvalError::InvalidExpression(_))
    ));
    assert!(matches!(
        decode_expr(&json!({ "kind": "operator", "op": "+", "e1": num(1.0) })),
        Err(EvalError::InvalidExpression(_))
    ));
}

#[test]
fn malformed_blocks() {
    assert_eq!(
        decode_stmt(&json!({ "kind": "if", "test": boolean(true), "truePart": [] })),
        Err(EvalError::InvalidStatement(
            "'if' statement is missing 'falsePart'".into()
        ))
    );
    assert!(matches!(
        decode_stmt(&json!({ "kind": "while", "test": boolean(true), "body": {} })),
        Err(EvalError::InvalidStatement(_))
    ));
}

#[test]
fn errors_deep_in_a_program_surface_before_running() {
    let program = json!([
        { "kind": "print", "expression": num(1.0) },
        { "kind": "while", "test": boolean(false), "body": [
            { "kind": "frobnicate" }
        ] }
    ]);
    assert!(matches!(
        decode_program(&program),
        Err(EvalError::InvalidStatement(_))
    ));
}

#[test]
fn program_must_be_an_array() {
    assert!(matches!(
        decode_program(&json!({ "kind": "let" })),
        Err(EvalError::InvalidStatement(_))
    ));
    assert!(matches!(
        decode_program_str("[{"),
        Err(EvalError::InvalidStatement(_))
    ));
}
