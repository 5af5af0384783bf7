//! Subcommand implementations. Each returns whether the input was free of
//! errors; `main` turns that into the exit code.

use crate::report::{render, Diagnostic};
use rewind_ir::Channel;
use rewind_java::{grammar, lex, parse_all, parse_tokens, ParsedFile};
use rewind_parse::{ParseStats, ParserConfig, TracingObserver, TreeBuilder};
use std::fs;
use std::io::IsTerminal;

/// Flags shared by `parse` and `check`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    pub recover: bool,
    pub memoize: bool,
    pub tree: bool,
    pub stats: bool,
    pub trace: bool,
    pub max_steps: Option<u64>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            recover: false,
            memoize: true,
            tree: false,
            stats: false,
            trace: false,
            max_steps: None,
        }
    }
}

impl ParseOptions {
    /// Split `args` into options and file paths.
    pub fn from_args(args: &[String]) -> Result<(Self, Vec<String>), String> {
        let mut options = ParseOptions::default();
        let mut paths = Vec::new();
        for arg in args {
            match arg.as_str() {
                "--recover" | "-r" => options.recover = true,
                "--no-memo" => options.memoize = false,
                "--tree" | "-t" => options.tree = true,
                "--stats" => options.stats = true,
                "--trace" => options.trace = true,
                other => {
                    if let Some(steps) = other.strip_prefix("--max-steps=") {
                        let steps = steps
                            .parse()
                            .map_err(|_| format!("invalid step budget '{steps}'"))?;
                        options.max_steps = Some(steps);
                    } else if other.starts_with('-') {
                        return Err(format!("unknown option '{other}'"));
                    } else {
                        paths.push(other.to_string());
                    }
                }
            }
        }
        Ok((options, paths))
    }

    pub fn config(&self) -> ParserConfig {
        let config = ParserConfig::default()
            .with_recovery(self.recover)
            .with_memoization(self.memoize);
        match self.max_steps {
            Some(steps) => config.with_max_steps(steps),
            None => config,
        }
    }
}

fn read(path: &str) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(source) => Some(source),
        Err(err) => {
            eprintln!("error: cannot read '{path}': {err}");
            None
        }
    }
}

fn report(path: &str, source: &str, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }
    let color = std::io::stderr().is_terminal();
    match render(path, source, diagnostics, color) {
        Ok(text) => eprint!("{text}"),
        Err(err) => eprintln!("error: cannot render diagnostics for '{path}': {err}"),
    }
}

fn file_diagnostics(file: &ParsedFile) -> Vec<Diagnostic> {
    let mut diagnostics: Vec<Diagnostic> = file.lex_errors.iter().map(Diagnostic::from).collect();
    diagnostics.extend(file.diagnostics.iter().map(Diagnostic::from));
    diagnostics.sort_by_key(|d| d.span.start);
    diagnostics
}

fn format_stats(stats: &ParseStats) -> String {
    format!(
        "{} rule calls, {} trials, depth {}, memo {} hits / {} misses / {} entries",
        stats.steps,
        stats.trials,
        stats.max_depth,
        stats.memo.hits,
        stats.memo.misses,
        stats.memo.records,
    )
}

/// `rewind lex <file>`: print every token, comments included.
pub fn lex_file(path: &str) -> bool {
    let Some(source) = read(path) else {
        return false;
    };
    let (tokens, errors) = lex(&source);
    for token in tokens.iter() {
        let hidden = if token.channel == Channel::Hidden {
            " (hidden)"
        } else {
            ""
        };
        println!(
            "{}:{}\t{:?}\t{:?}{hidden}",
            token.pos.line,
            token.pos.column,
            token.kind,
            tokens.text(token),
        );
    }
    let diagnostics: Vec<Diagnostic> = errors.iter().map(Diagnostic::from).collect();
    report(path, &source, &diagnostics);
    diagnostics.is_empty()
}

/// `rewind parse <file>`: parse one file, optionally printing its tree.
pub fn parse_file(path: &str, options: &ParseOptions) -> bool {
    let Some(source) = read(path) else {
        return false;
    };
    let (tokens, lex_errors) = lex(&source);
    let mut tracer = TracingObserver::new();
    let observer = if options.trace {
        Some(&mut tracer as &mut dyn rewind_parse::ParseObserver)
    } else {
        None
    };

    let output = match parse_tokens(&tokens, options.config(), TreeBuilder::new(), observer) {
        Ok(output) => output,
        Err(err) => {
            let mut diagnostics: Vec<Diagnostic> = lex_errors.iter().map(Diagnostic::from).collect();
            diagnostics.push(Diagnostic::from(&err));
            report(path, &source, &diagnostics);
            return false;
        }
    };

    let file = ParsedFile {
        tokens,
        lex_errors,
        tree: output.value,
        diagnostics: output.diagnostics,
        stats: output.stats,
    };
    if options.tree {
        println!("{}", file.sexpr());
    }
    if options.stats {
        println!("{path}: {}", format_stats(&file.stats));
    }
    report(path, &source, &file_diagnostics(&file));
    file.is_clean()
}

/// `rewind check <files...>`: parse every file in parallel and report.
pub fn check_files(paths: &[String], options: &ParseOptions) -> bool {
    let sources: Vec<Option<String>> = paths.iter().map(|path| read(path)).collect();
    let readable: Vec<&str> = sources.iter().flatten().map(String::as_str).collect();
    let mut results = parse_all(&readable, &options.config()).into_iter();

    let mut ok = true;
    for (path, source) in paths.iter().zip(&sources) {
        let Some(source) = source else {
            ok = false;
            continue;
        };
        let Some(result) = results.next() else {
            break;
        };
        match result {
            Ok(file) => {
                let diagnostics = file_diagnostics(&file);
                if diagnostics.is_empty() {
                    println!("ok {path}");
                } else {
                    ok = false;
                    report(path, source, &diagnostics);
                }
                if options.stats {
                    println!("{path}: {}", format_stats(&file.stats));
                }
            }
            Err(err) => {
                ok = false;
                report(path, source, &[Diagnostic::from(&err)]);
            }
        }
    }
    ok
}

/// `rewind decisions`: summarize the grammar's lookahead tables.
pub fn print_decisions() {
    for decision in grammar::decisions() {
        let alternatives: Vec<&str> = decision.alternatives().iter().map(|a| a.name).collect();
        println!(
            "{:<12} k={} states={:<3} {}",
            decision.name(),
            decision.k(),
            decision.state_count(),
            alternatives.join(" | "),
        );
    }
}
