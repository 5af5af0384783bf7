//! rewind CLI
//!
//! Lexes, parses and checks Java-subset source files with the backtracking
//! parser. Set `RUST_LOG` (e.g. `RUST_LOG=rewind_parse=debug`) for
//! decision and recovery logs, or pass `--trace` to `parse` for the full
//! rule call tree.

mod commands;
mod report;

use commands::{check_files, lex_file, parse_file, print_decisions, ParseOptions};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::FAILURE;
    }

    let command = args[1].as_str();
    let rest = &args[2..];

    let ok = match command {
        "lex" => {
            let Some(path) = rest.first() else {
                eprintln!("Usage: rewind lex <file.java>");
                return ExitCode::FAILURE;
            };
            init_tracing(false);
            lex_file(path)
        }
        "parse" | "check" => {
            let (options, paths) = match ParseOptions::from_args(rest) {
                Ok(parsed) => parsed,
                Err(err) => {
                    eprintln!("error: {err}");
                    return ExitCode::FAILURE;
                }
            };
            if paths.is_empty() {
                eprintln!("Usage: rewind {command} <file.java>... [options]");
                return ExitCode::FAILURE;
            }
            init_tracing(options.trace);
            if command == "parse" {
                paths.iter().fold(true, |ok, path| parse_file(path, &options) && ok)
            } else {
                check_files(&paths, &options)
            }
        }
        "decisions" => {
            init_tracing(false);
            print_decisions();
            true
        }
        "help" | "--help" | "-h" => {
            print_usage();
            true
        }
        "version" | "--version" | "-V" => {
            println!("rewind {}", env!("CARGO_PKG_VERSION"));
            true
        }
        _ => {
            eprintln!("Unknown command: {command}");
            eprintln!();
            print_usage();
            false
        }
    };

    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Install a subscriber if `RUST_LOG` is set or rule tracing was asked
/// for. Without either, logging stays off.
fn init_tracing(trace_rules: bool) {
    use tracing_subscriber::{prelude::*, EnvFilter};

    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) if trace_rules => EnvFilter::new("rewind_parse=trace"),
        Err(_) => return,
    };
    tracing_subscriber::registry()
        .with(
            tracing_tree::HierarchicalLayer::new(2)
                .with_targets(true)
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

fn print_usage() {
    println!("rewind: backtracking parser for a Java subset");
    println!();
    println!("Usage: rewind <command> [options]");
    println!();
    println!("Commands:");
    println!("  lex <file>            Print every token, comments included");
    println!("  parse <files...>      Parse files one at a time");
    println!("  check <files...>      Parse files in parallel and report errors");
    println!("  decisions             Summarize the grammar's lookahead decisions");
    println!("  help                  Show this help message");
    println!("  version               Show version information");
    println!();
    println!("Parse options:");
    println!("  --recover, -r         Recover from syntax errors and keep going");
    println!("  --no-memo             Disable memoization of speculative rule results");
    println!("  --tree, -t            Print the parse tree as an s-expression");
    println!("  --stats               Print rule call, trial and memo counters");
    println!("  --trace               Log every rule entry and exit (parse only)");
    println!("  --max-steps=<n>       Abort after n rule invocations");
    println!();
    println!("Examples:");
    println!("  rewind parse --tree Shapes.java");
    println!("  rewind check --recover src/*.java");
    println!("  RUST_LOG=rewind_parse=debug rewind parse Shapes.java");
}
