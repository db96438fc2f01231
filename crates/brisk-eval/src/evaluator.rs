//! Core expression and statement evaluator.

use crate::error::{EvalError, EvalResult};
use crate::output::OutputSink;
use crate::scope::{ScopeChain, ScopeId};
use brisk_types::ast::*;
use brisk_types::{Bindings, Value};
use tracing::{debug, trace};

/// Knobs for a single evaluation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EvalOptions {
    /// Maximum number of statements plus expressions to evaluate.
    /// `None` runs to completion, however long that takes.
    pub step_limit: Option<u64>,
}

impl EvalOptions {
    pub fn with_step_limit(limit: u64) -> Self {
        Self {
            step_limit: Some(limit),
        }
    }
}

/// Counts evaluation steps against an optional limit.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct StepBudget {
    limit: Option<u64>,
    used: u64,
}

impl StepBudget {
    pub(crate) fn new(limit: Option<u64>) -> Self {
        Self { limit, used: 0 }
    }

    /// Consume one step. Errors once the limit is passed.
    fn tick(&mut self) -> EvalResult<()> {
        self.used += 1;
        match self.limit {
            Some(limit) if self.used > limit => Err(EvalError::StepLimitExceeded(limit)),
            _ => Ok(()),
        }
    }
}

/// Evaluate `expr` in `scope`. The chain is only read.
///
/// Both operands of a binary operator are evaluated, left first, before the
/// operator is applied; `&&` and `||` do not short-circuit.
pub(crate) fn eval_in(
    chain: &ScopeChain,
    scope: ScopeId,
    expr: &Expr,
    budget: &mut StepBudget,
) -> EvalResult<Value> {
    budget.tick()?;
    match &expr.kind {
        ExprKind::Bool(b) => Ok(Value::Boolean(*b)),
        ExprKind::Number(n) => Ok(Value::Number(*n)),
        ExprKind::Variable(name) => chain.lookup(scope, name),
        ExprKind::Binary { op, left, right } => {
            let lhs = eval_in(chain, scope, left, budget)?;
            let rhs = eval_in(chain, scope, right, budget)?;
            apply_binary(*op, lhs, rhs)
        }
    }
}

/// Apply a binary operator to two already-evaluated operands.
///
/// Operands of different types are rejected before the operator is even
/// looked at, so `1 === true` is a mismatch rather than `false`.
pub fn apply_binary(op: BinOp, lhs: Value, rhs: Value) -> EvalResult<Value> {
    if !lhs.same_type(&rhs) {
        return Err(EvalError::TypeMismatch(format!(
            "'{op}' operands must have the same type, got {} and {}",
            lhs.type_name(),
            rhs.type_name()
        )));
    }
    use Value::{Boolean, Number};
    match (op, lhs, rhs) {
        (BinOp::StrictEq, l, r) => Ok(Boolean(l == r)),
        (BinOp::And, Boolean(a), Boolean(b)) => Ok(Boolean(a && b)),
        (BinOp::Or, Boolean(a), Boolean(b)) => Ok(Boolean(a || b)),
        // IEEE-754 throughout: x / 0 is ±Infinity, 0 / 0 is NaN.
        (BinOp::Add, Number(a), Number(b)) => Ok(Number(a + b)),
        (BinOp::Sub, Number(a), Number(b)) => Ok(Number(a - b)),
        (BinOp::Mul, Number(a), Number(b)) => Ok(Number(a * b)),
        (BinOp::Div, Number(a), Number(b)) => Ok(Number(a / b)),
        (BinOp::Less, Number(a), Number(b)) => Ok(Boolean(a < b)),
        (BinOp::Greater, Number(a), Number(b)) => Ok(Boolean(a > b)),
        (op, operand, _) => Err(EvalError::TypeMismatch(format!(
            "'{op}' cannot be applied to {} operands",
            operand.type_name()
        ))),
    }
}

/// Walks statements against a [`ScopeChain`], sending `print` output to a sink.
pub struct Evaluator<'a> {
    chain: &'a mut ScopeChain,
    sink: &'a mut dyn OutputSink,
    budget: StepBudget,
}

impl<'a> Evaluator<'a> {
    /// Create an evaluator with no step limit.
    pub fn new(chain: &'a mut ScopeChain, sink: &'a mut dyn OutputSink) -> Self {
        Self::with_options(chain, sink, EvalOptions::default())
    }

    pub fn with_options(
        chain: &'a mut ScopeChain,
        sink: &'a mut dyn OutputSink,
        options: EvalOptions,
    ) -> Self {
        Self {
            chain,
            sink,
            budget: StepBudget::new(options.step_limit),
        }
    }

    /// Steps consumed so far.
    pub fn steps_used(&self) -> u64 {
        self.budget.used
    }

    pub fn chain(&self) -> &ScopeChain {
        &*self.chain
    }

    /// Bindings of the root scope as they stand right now.
    pub fn root_bindings(&self) -> &Bindings {
        self.chain.bindings(self.chain.root())
    }

    // ══════════════════════════════════════════════════════════════════════
    // Expressions
    // ══════════════════════════════════════════════════════════════════════

    pub fn eval_expr(&mut self, scope: ScopeId, expr: &Expr) -> EvalResult<Value> {
        eval_in(self.chain, scope, expr, &mut self.budget)
    }

    /// Evaluate an `if` / `while` test, insisting on a boolean.
    fn eval_condition(&mut self, scope: ScopeId, test: &Expr, keyword: &str) -> EvalResult<bool> {
        match self.eval_expr(scope, test)? {
            Value::Boolean(b) => Ok(b),
            other => Err(EvalError::NonBooleanCondition(format!(
                "'{keyword}' test evaluated to {} {other}",
                other.type_name()
            ))),
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Statements
    // ══════════════════════════════════════════════════════════════════════

    /// Execute the statements of `program` in the root scope.
    pub fn run(&mut self, program: &Program) -> EvalResult<()> {
        debug!(statements = program.stmts.len(), "program start");
        let root = self.chain.root();
        let result = program
            .stmts
            .iter()
            .try_for_each(|stmt| self.exec_stmt(root, stmt));
        match &result {
            Ok(()) => debug!(
                steps = self.budget.used,
                bindings = self.root_bindings().len(),
                "program finished"
            ),
            Err(err) => debug!(steps = self.budget.used, %err, "program failed"),
        }
        result
    }

    /// Execute one statement in `scope`.
    pub fn exec_stmt(&mut self, scope: ScopeId, stmt: &Stmt) -> EvalResult<()> {
        self.budget.tick()?;
        trace!(kind = stmt.kind_name(), line = stmt.span().line, "exec");
        match stmt {
            Stmt::Let(s) => {
                let value = self.eval_expr(scope, &s.value)?;
                self.chain.declare(scope, &s.name.name, value)
            }
            Stmt::Assign(s) => {
                let value = self.eval_expr(scope, &s.value)?;
                self.chain.assign(scope, &s.name.name, value)
            }
            Stmt::If(s) => {
                if self.eval_condition(scope, &s.test, "if")? {
                    self.exec_block(scope, &s.then_block)
                } else {
                    self.exec_block(scope, &s.else_block)
                }
            }
            Stmt::While(s) => {
                while self.eval_condition(scope, &s.test, "while")? {
                    self.exec_block(scope, &s.body)?;
                }
                Ok(())
            }
            Stmt::Print(s) => {
                let value = self.eval_expr(scope, &s.value)?;
                self.sink.emit(&value);
                Ok(())
            }
        }
    }

    /// Run `block` in a fresh child of `scope`. The child is released
    /// whether or not the block completes.
    pub fn exec_block(&mut self, scope: ScopeId, block: &Block) -> EvalResult<()> {
        let child = self.chain.enter_block(scope);
        let depth = self.chain.depth(child);
        debug!(depth, "enter block");
        let result = block
            .stmts
            .iter()
            .try_for_each(|stmt| self.exec_stmt(child, stmt));
        self.chain.exit_block(child);
        debug!(depth, "exit block");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: f64) -> Value {
        Value::Number(v)
    }

    fn b(v: bool) -> Value {
        Value::Boolean(v)
    }

    #[test]
    fn arithmetic() {
        assert_eq!(apply_binary(BinOp::Add, n(2.0), n(3.0)), Ok(n(5.0)));
        assert_eq!(apply_binary(BinOp::Sub, n(2.0), n(3.0)), Ok(n(-1.0)));
        assert_eq!(apply_binary(BinOp::Mul, n(2.0), n(3.0)), Ok(n(6.0)));
        assert_eq!(apply_binary(BinOp::Div, n(3.0), n(2.0)), Ok(n(1.5)));
    }

    #[test]
    fn division_by_zero_is_ieee() {
        assert_eq!(apply_binary(BinOp::Div, n(1.0), n(0.0)), Ok(n(f64::INFINITY)));
        assert_eq!(
            apply_binary(BinOp::Div, n(-1.0), n(0.0)),
            Ok(n(f64::NEG_INFINITY))
        );
        let nan = apply_binary(BinOp::Div, n(0.0), n(0.0)).unwrap();
        assert!(nan.as_number().unwrap().is_nan());
    }

    #[test]
    fn strict_equality() {
        assert_eq!(apply_binary(BinOp::StrictEq, n(1.0), n(1.0)), Ok(b(true)));
        assert_eq!(apply_binary(BinOp::StrictEq, b(true), b(false)), Ok(b(false)));
        assert_eq!(
            apply_binary(BinOp::StrictEq, n(f64::NAN), n(f64::NAN)),
            Ok(b(false))
        );
        assert!(matches!(
            apply_binary(BinOp::StrictEq, n(1.0), b(true)),
            Err(EvalError::TypeMismatch(_))
        ));
    }

    #[test]
    fn logic_and_comparison() {
        assert_eq!(apply_binary(BinOp::And, b(true), b(false)), Ok(b(false)));
        assert_eq!(apply_binary(BinOp::Or, b(true), b(false)), Ok(b(true)));
        assert_eq!(apply_binary(BinOp::Less, n(1.0), n(2.0)), Ok(b(true)));
        assert_eq!(apply_binary(BinOp::Greater, n(1.0), n(2.0)), Ok(b(false)));
    }

    #[test]
    fn operator_on_wrong_type() {
        assert_eq!(
            apply_binary(BinOp::Add, b(true), b(true)),
            Err(EvalError::TypeMismatch(
                "'+' cannot be applied to boolean operands".into()
            ))
        );
        assert!(matches!(
            apply_binary(BinOp::And, n(1.0), n(1.0)),
            Err(EvalError::TypeMismatch(_))
        ));
        assert!(matches!(
            apply_binary(BinOp::Less, b(false), b(true)),
            Err(EvalError::TypeMismatch(_))
        ));
    }

    #[test]
    fn step_budget_counts() {
        let mut budget = StepBudget::new(Some(2));
        assert!(budget.tick().is_ok());
        assert!(budget.tick().is_ok());
        assert_eq!(budget.tick(), Err(EvalError::StepLimitExceeded(2)));
    }
}
