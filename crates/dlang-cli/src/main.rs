//! Command-line driver for the Dlang interpreter.
//!
//! `dlang FILE` runs a script, printing each `print` line to stdout.
//! Without a file it starts an interactive session.

mod repl;

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Dlang is a small scripting language with variables, loops and functions.
#[derive(Parser, Debug)]
#[command(name = "dlang", version, about, long_about = None)]
struct Args {
    /// Script to run. Starts a REPL when omitted.
    file: Option<PathBuf>,

    /// Print an intermediate stage as JSON instead of running the script.
    #[arg(long, value_enum, requires = "file")]
    emit: Option<Emit>,

    /// List the reserved keywords and exit.
    #[arg(long)]
    keywords: bool,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Emit {
    /// Token stream
    Tokens,
    /// Parsed program
    Ast,
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match dispatch(args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn dispatch(args: Args) -> Result<ExitCode> {
    if args.keywords {
        for keyword in dlang::KEYWORDS {
            println!("{keyword}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let Some(path) = args.file else {
        repl::run()?;
        return Ok(ExitCode::SUCCESS);
    };

    let source = fs::read_to_string(&path)
        .with_context(|| format!("failed to read `{}`", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = source.len(), "loaded script");

    match args.emit {
        Some(stage) => emit(stage, &source),
        None => Ok(run_script(&source)),
    }
}

/// Run a whole script. Output is all-or-nothing: a failing script prints
/// only the error.
fn run_script(source: &str) -> ExitCode {
    match dlang::run(source) {
        Ok(output) => {
            for line in output.printed_lines {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn emit(stage: Emit, source: &str) -> Result<ExitCode> {
    let tokens = match dlang::tokenize(source) {
        Ok(tokens) => tokens,
        Err(err) => {
            eprintln!("error: {err}");
            return Ok(ExitCode::FAILURE);
        }
    };

    let json = match stage {
        Emit::Tokens => serde_json::to_string_pretty(&tokens)?,
        Emit::Ast => match dlang::parse(tokens) {
            Ok(program) => serde_json::to_string_pretty(&program)?,
            Err(err) => {
                eprintln!("error: {err}");
                return Ok(ExitCode::FAILURE);
            }
        },
    };
    println!("{json}");
    Ok(ExitCode::SUCCESS)
}
