//! Shared types for Brisk.
//!
//! This crate defines the AST node types, runtime values, source spans and
//! syntax diagnostics used by every stage of the pipeline.

mod error;
mod span;
mod value;
pub mod ast;

pub use error::{Diagnostic, Diagnostics, ErrorCode, MAX_ERRORS};
pub use span::{SourceFile, Span};
pub use value::{Bindings, Value};
