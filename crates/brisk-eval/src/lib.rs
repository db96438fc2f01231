//! Brisk tree-walking evaluator.
//!
//! Executes Brisk programs directly from the AST. A program runs against a
//! [`ScopeChain`] whose root scope holds the final variable bindings, and
//! every `print` is delivered to an [`OutputSink`]. The first runtime error
//! aborts the run and is returned as an [`EvalError`].

pub mod decode;
pub mod error;
pub mod evaluator;
pub mod output;
pub mod scope;

pub use error::{EvalError, EvalResult};
pub use evaluator::{apply_binary, EvalOptions, Evaluator};
pub use output::{NullSink, OutputSink, StdoutSink};
pub use scope::{ScopeChain, ScopeId};

use brisk_types::ast::{Expr, Program, Stmt};
use brisk_types::{Bindings, Value};
use evaluator::StepBudget;

/// Evaluate a single expression in `scope` without touching any binding.
pub fn eval_expression(chain: &ScopeChain, scope: ScopeId, expr: &Expr) -> EvalResult<Value> {
    evaluator::eval_in(chain, scope, expr, &mut StepBudget::new(None))
}

/// Execute one statement against the root of `chain` and return the root
/// bindings afterwards.
pub fn eval_statement(
    chain: &mut ScopeChain,
    stmt: &Stmt,
    sink: &mut dyn OutputSink,
) -> EvalResult<Bindings> {
    let root = chain.root();
    Evaluator::new(chain, sink).exec_stmt(root, stmt)?;
    Ok(chain.bindings(root).clone())
}

/// Run `program` from an empty root scope and return its final bindings.
pub fn eval_program(program: &Program, sink: &mut dyn OutputSink) -> EvalResult<Bindings> {
    eval_program_with(program, EvalOptions::default(), sink)
}

pub fn eval_program_with(
    program: &Program,
    options: EvalOptions,
    sink: &mut dyn OutputSink,
) -> EvalResult<Bindings> {
    let mut chain = ScopeChain::new();
    Evaluator::with_options(&mut chain, sink, options).run(program)?;
    Ok(chain.into_root_bindings())
}
