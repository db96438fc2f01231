//! Runtime error types for the Brisk evaluator.

use thiserror::Error;

/// Evaluation error. Every variant is fatal: evaluation stops at the first
/// one and it is handed back to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Unrecognized expression kind or operator.
    #[error("invalid expression: {0}")]
    InvalidExpression(String),
    /// Unrecognized statement kind or malformed statement fields.
    #[error("invalid statement: {0}")]
    InvalidStatement(String),
    /// Read or assignment with no reachable declaration.
    #[error("unbound variable: {0}")]
    UnboundVariable(String),
    /// `let` of a name already declared in the same scope.
    #[error("duplicate declaration: '{0}' is already declared in this scope")]
    DuplicateDeclaration(String),
    #[error("type mismatch: {0}")]
    TypeMismatch(String),
    /// `if` / `while` test that is not a boolean.
    #[error("non-boolean condition: {0}")]
    NonBooleanCondition(String),
    /// Missing or non-string variable name.
    #[error("invalid name: {0}")]
    InvalidName(String),
    /// The caller-supplied step budget ran out.
    #[error("step limit of {0} exceeded")]
    StepLimitExceeded(u64),
}

/// Result alias for evaluator operations.
pub type EvalResult<T> = Result<T, EvalError>;
