//! Destinations for `print` output.

use brisk_types::Value;

/// Receives each value produced by a `print` statement, in execution order.
pub trait OutputSink {
    fn emit(&mut self, value: &Value);
}

/// Writes each value to stdout on its own line.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl OutputSink for StdoutSink {
    fn emit(&mut self, value: &Value) {
        println!("{value}");
    }
}

/// Discards everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl OutputSink for NullSink {
    fn emit(&mut self, _value: &Value) {}
}

/// Collects the values themselves.
impl OutputSink for Vec<Value> {
    fn emit(&mut self, value: &Value) {
        self.push(*value);
    }
}

/// Collects the rendered text, one line per value.
impl OutputSink for String {
    fn emit(&mut self, value: &Value) {
        self.push_str(&value.to_string());
        self.push('\n');
    }
}
