//! Decoding of JSON-shaped ASTs into [`brisk_types::ast`] nodes.
//!
//! Expressions look like `{"kind": "operator", "op": "+", "e1": .., "e2": ..}`
//! and statements like `{"kind": "let", "name": "x", "expression": ..}`; a
//! program is an array of statements. Anything outside that shape is rejected
//! here, so evaluation never sees an unknown kind or operator.

use crate::error::{EvalError, EvalResult};
use brisk_types::ast::*;
use serde_json::{Map, Value as Json};

type Object = Map<String, Json>;

/// Decode a program: a JSON array of statements.
pub fn decode_program(json: &Json) -> EvalResult<Program> {
    let stmts = json.as_array().ok_or_else(|| {
        EvalError::InvalidStatement(format!(
            "a program must be an array of statements, got {}",
            describe(json)
        ))
    })?;
    Ok(Program::new(decode_stmts(stmts)?))
}

/// Decode program text. Malformed JSON is reported as an invalid statement.
pub fn decode_program_str(text: &str) -> EvalResult<Program> {
    let json: Json = serde_json::from_str(text)
        .map_err(|e| EvalError::InvalidStatement(format!("malformed JSON: {e}")))?;
    decode_program(&json)
}

fn decode_stmts(stmts: &[Json]) -> EvalResult<Vec<Stmt>> {
    stmts.iter().map(decode_stmt).collect()
}

// ══════════════════════════════════════════════════════════════════════════════
// Statements
// ══════════════════════════════════════════════════════════════════════════════

pub fn decode_stmt(json: &Json) -> EvalResult<Stmt> {
    let obj = json.as_object().ok_or_else(|| {
        EvalError::InvalidStatement(format!("expected a statement object, got {}", describe(json)))
    })?;

    // A present-but-ill-typed name is reported before anything else.
    if let Some(name) = obj.get("name") {
        if !name.is_string() {
            return Err(invalid_name(name));
        }
    }

    let kind = obj.get("kind").and_then(Json::as_str).unwrap_or_default();
    match kind {
        "let" => Ok(Stmt::let_(stmt_name(obj)?, stmt_expr(obj, "expression")?)),
        "assignment" => Ok(Stmt::assign(stmt_name(obj)?, stmt_expr(obj, "expression")?)),
        "if" => Ok(Stmt::if_(
            stmt_expr(obj, "test")?,
            stmt_block(obj, "if", "truePart")?,
            stmt_block(obj, "if", "falsePart")?,
        )),
        "while" => Ok(Stmt::while_(
            stmt_expr(obj, "test")?,
            stmt_block(obj, "while", "body")?,
        )),
        "print" => Ok(Stmt::print(stmt_expr(obj, "expression")?)),
        _ => Err(EvalError::InvalidStatement(format!(
            "unknown statement kind {}",
            describe_kind(obj)
        ))),
    }
}

fn stmt_name(obj: &Object) -> EvalResult<String> {
    match obj.get("name") {
        Some(Json::String(name)) => Ok(name.clone()),
        Some(other) => Err(invalid_name(other)),
        None => Err(EvalError::InvalidName("missing variable name".into())),
    }
}

/// A required expression field. An absent field is decoded as `null`, which
/// fails as an invalid expression.
fn stmt_expr(obj: &Object, field: &str) -> EvalResult<Expr> {
    decode_expr(obj.get(field).unwrap_or(&Json::Null))
}

fn stmt_block(obj: &Object, kind: &str, field: &str) -> EvalResult<Vec<Stmt>> {
    match obj.get(field) {
        Some(Json::Array(stmts)) => decode_stmts(stmts),
        Some(other) => Err(EvalError::InvalidStatement(format!(
            "'{kind}' field '{field}' must be an array of statements, got {}",
            describe(other)
        ))),
        None => Err(EvalError::InvalidStatement(format!(
            "'{kind}' statement is missing '{field}'"
        ))),
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

pub fn decode_expr(json: &Json) -> EvalResult<Expr> {
    let obj = json.as_object().ok_or_else(|| {
        EvalError::InvalidExpression(format!(
            "expected an expression object, got {}",
            describe(json)
        ))
    })?;

    let kind = obj.get("kind").and_then(Json::as_str).unwrap_or_default();
    match kind {
        "boolean" => match obj.get("value") {
            Some(Json::Bool(b)) => Ok(Expr::boolean(*b)),
            other => Err(bad_literal("boolean", other)),
        },
        "number" => match obj.get("value").and_then(Json::as_f64) {
            Some(n) => Ok(Expr::number(n)),
            None => Err(bad_literal("number", obj.get("value"))),
        },
        "variable" => match obj.get("name") {
            Some(Json::String(name)) => Ok(Expr::variable(name.as_str())),
            Some(other) => Err(invalid_name(other)),
            None => Err(EvalError::InvalidName("missing variable name".into())),
        },
        "operator" => {
            let op = obj
                .get("op")
                .and_then(Json::as_str)
                .and_then(BinOp::from_symbol)
                .ok_or_else(|| {
                    EvalError::InvalidExpression(format!(
                        "unknown operator {}",
                        obj.get("op").map_or_else(|| "(missing)".to_string(), describe)
                    ))
                })?;
            let left = decode_expr(obj.get("e1").unwrap_or(&Json::Null))?;
            let right = decode_expr(obj.get("e2").unwrap_or(&Json::Null))?;
            Ok(Expr::binary(op, left, right))
        }
        _ => Err(EvalError::InvalidExpression(format!(
            "unknown expression kind {}",
            describe_kind(obj)
        ))),
    }
}

fn bad_literal(kind: &str, value: Option<&Json>) -> EvalError {
    EvalError::InvalidExpression(format!(
        "'{kind}' literal needs a {kind} 'value', got {}",
        value.map_or_else(|| "(missing)".to_string(), describe)
    ))
}

fn invalid_name(name: &Json) -> EvalError {
    EvalError::InvalidName(format!(
        "variable names must be strings, got {}",
        describe(name)
    ))
}

fn describe_kind(obj: &Object) -> String {
    obj.get("kind")
        .map_or_else(|| "(missing)".to_string(), describe)
}

/// Compact rendering of a JSON value for error messages.
fn describe(json: &Json) -> String {
    let text = json.to_string();
    if text.chars().count() > 40 {
        let cut: String = text.chars().take(37).collect();
        format!("{cut}...")
    } else {
        text
    }
}
