//! Brisk CLI
//!
//! Runs `.bk` source files or JSON-encoded ASTs and reports the final bindings.

use std::process::ExitCode;

use brisk::{init_tracing, render_diagnostics, run_json, run_source, EvalOptions, RunOutcome, StdoutSink};

const USAGE: &str = "\
Usage: brisk <command> [options]

Commands:
  run <file.bk>       Parse and run Brisk source
  ast <file.json>     Run a JSON-encoded program

Options:
  --step-limit=<n>    Abort after <n> evaluation steps
  --json              Print the outcome as JSON
  --version           Print the version and exit

Set RUST_LOG (e.g. RUST_LOG=brisk_eval=debug) to trace evaluation on stderr.";

/// Exit status for syntax, decode, and runtime errors.
const EXIT_FAILURE: u8 = 1;
/// Exit status for bad command lines.
const EXIT_USAGE: u8 = 2;

struct RunArgs {
    path: String,
    options: EvalOptions,
    json: bool,
}

fn parse_run_args(command: &str, args: &[String]) -> Result<RunArgs, String> {
    let mut path = None;
    let mut options = EvalOptions::default();
    let mut json = false;

    for arg in args {
        if let Some(limit) = arg.strip_prefix("--step-limit=") {
            let limit = limit
                .parse::<u64>()
                .map_err(|_| format!("invalid step limit '{limit}'"))?;
            options.step_limit = Some(limit);
        } else if arg == "--json" {
            json = true;
        } else if arg.starts_with('-') {
            return Err(format!("unknown option '{arg}'"));
        } else if path.is_none() {
            path = Some(arg.clone());
        } else {
            return Err(format!("unexpected argument '{arg}'"));
        }
    }

    let path = path.ok_or_else(|| format!("'{command}' needs a file path"))?;
    Ok(RunArgs { path, options, json })
}

fn report(outcome: &RunOutcome, json: bool) -> ExitCode {
    if json {
        match serde_json::to_string_pretty(outcome) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("error: cannot serialize outcome: {e}");
                return ExitCode::from(EXIT_FAILURE);
            }
        }
    } else if outcome.success {
        for (name, value) in &outcome.bindings {
            println!("{name} = {value}");
        }
    } else if outcome.diagnostics.has_errors() {
        eprintln!("{}", render_diagnostics(&outcome.diagnostics));
    } else if let Some(err) = &outcome.error {
        eprintln!("error: {err}");
    }

    if outcome.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(EXIT_FAILURE)
    }
}

fn main() -> ExitCode {
    init_tracing();
    let args: Vec<String> = std::env::args().collect();

    let Some(command) = args.get(1) else {
        eprintln!("{USAGE}");
        return ExitCode::from(EXIT_USAGE);
    };

    match command.as_str() {
        "--version" | "-V" => {
            println!("brisk {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        "--help" | "-h" | "help" => {
            println!("{USAGE}");
            ExitCode::SUCCESS
        }
        "run" | "ast" => {
            let run_args = match parse_run_args(command, &args[2..]) {
                Ok(run_args) => run_args,
                Err(msg) => {
                    eprintln!("error: {msg}");
                    eprintln!();
                    eprintln!("{USAGE}");
                    return ExitCode::from(EXIT_USAGE);
                }
            };
            let text = match std::fs::read_to_string(&run_args.path) {
                Ok(text) => text,
                Err(e) => {
                    eprintln!("error: cannot read '{}': {e}", run_args.path);
                    return ExitCode::from(EXIT_FAILURE);
                }
            };
            let mut sink = StdoutSink;
            let outcome = if command == "run" {
                run_source(&text, &run_args.path, run_args.options, &mut sink)
            } else {
                run_json(&text, run_args.options, &mut sink)
            };
            report(&outcome, run_args.json)
        }
        other => {
            eprintln!("error: unknown command '{other}'");
            eprintln!();
            eprintln!("{USAGE}");
            ExitCode::from(EXIT_USAGE)
        }
    }
}
