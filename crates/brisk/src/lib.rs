//! Brisk: orchestrates the full pipeline from program text to final bindings.
//!
//! ```text
//! Brisk Source → Lexer → Parser ─┐
//!                                ├→ Evaluator → bindings + printed values
//! JSON AST     → Decoder ────────┘
//! ```

use std::sync::Once;

use brisk_eval::decode::decode_program_str;
use brisk_eval::{Evaluator, ScopeChain};
use brisk_lexer::Lexer;
use brisk_parser::Parser;
use brisk_types::ast::Program;
use brisk_types::SourceFile;
use serde::Serialize;

pub use brisk_eval::{EvalError, EvalOptions, NullSink, OutputSink, StdoutSink};
pub use brisk_types::{Bindings, Diagnostics, Value};

/// Result of running a program, successful or not.
///
/// Serializes as:
/// ```json
/// { "success": true, "bindings": { "x": 20.0 }, "diagnostics": { "errors": [], "total_errors": 0 }, "error": null }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunOutcome {
    /// `true` when the program parsed and ran to completion.
    pub success: bool,
    /// Root-scope bindings. After a runtime error these are the bindings as
    /// they stood when the error was raised.
    pub bindings: Bindings,
    /// Syntax errors from the lexer and parser.
    pub diagnostics: Diagnostics,
    /// Runtime or decode error message, if any.
    pub error: Option<String>,
}

impl RunOutcome {
    fn syntax_error(diagnostics: Diagnostics) -> Self {
        Self {
            success: false,
            bindings: Bindings::new(),
            diagnostics,
            error: None,
        }
    }

    fn runtime_error(bindings: Bindings, err: &EvalError) -> Self {
        Self {
            success: false,
            bindings,
            diagnostics: Diagnostics::empty(),
            error: Some(err.to_string()),
        }
    }
}

static TRACING_INIT: Once = Once::new();

/// Install a stderr `tracing` subscriber filtered by `RUST_LOG`.
///
/// Does nothing when `RUST_LOG` is unset; safe to call more than once.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(
                    fmt::layer()
                        .with_writer(std::io::stderr)
                        .with_target(true)
                        .with_level(true),
                )
                .with(EnvFilter::from_default_env())
                .init();
        }
    });
}

/// Lex and parse `source`, collecting every syntax error.
pub fn parse_source(source: &str, file_name: &str) -> Result<Program, Diagnostics> {
    let source_file = SourceFile::new(file_name, source);
    let lexed = Lexer::new(&source_file).lex();
    let mut diagnostics = lexed.errors;
    let parsed = Parser::new(lexed.tokens, &source_file).parse();
    diagnostics.extend(parsed.errors);
    match parsed.program {
        Some(program) if !diagnostics.has_errors() => Ok(program),
        _ => Err(diagnostics),
    }
}

/// Parse and run Brisk source text.
pub fn run_source(
    source: &str,
    file_name: &str,
    options: EvalOptions,
    sink: &mut dyn OutputSink,
) -> RunOutcome {
    match parse_source(source, file_name) {
        Ok(program) => run_program(&program, options, sink),
        Err(diagnostics) => {
            tracing::debug!(
                file = file_name,
                errors = diagnostics.total_errors,
                "syntax errors"
            );
            RunOutcome::syntax_error(diagnostics)
        }
    }
}

/// Decode and run a JSON-encoded program (an array of statement objects).
pub fn run_json(json: &str, options: EvalOptions, sink: &mut dyn OutputSink) -> RunOutcome {
    match decode_program_str(json) {
        Ok(program) => run_program(&program, options, sink),
        Err(err) => RunOutcome::runtime_error(Bindings::new(), &err),
    }
}

/// Run an already-built program from an empty root scope.
pub fn run_program(program: &Program, options: EvalOptions, sink: &mut dyn OutputSink) -> RunOutcome {
    let mut chain = ScopeChain::new();
    let result = Evaluator::with_options(&mut chain, sink, options).run(program);
    let bindings = chain.into_root_bindings();
    match result {
        Ok(()) => RunOutcome {
            success: true,
            bindings,
            diagnostics: Diagnostics::empty(),
            error: None,
        },
        Err(err) => RunOutcome::runtime_error(bindings, &err),
    }
}

/// Render diagnostics for a terminal, one block per error.
pub fn render_diagnostics(diagnostics: &Diagnostics) -> String {
    let mut out: Vec<String> = diagnostics.errors.iter().map(|d| d.render()).collect();
    let hidden = diagnostics.total_errors.saturating_sub(diagnostics.errors.len());
    if hidden > 0 {
        out.push(format!("... and {hidden} more errors"));
    }
    out.join("\n")
}
