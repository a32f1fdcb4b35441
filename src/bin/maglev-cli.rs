//! `maglev-cli` — the interactive shell / batch runner described in
//! spec.md §6, reproducing `original_source/src/main.c`'s argument
//! handling with `clap` in place of hand-rolled argv scanning.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use maglev::cli::shell::{run_batch_file, run_interactive, BatchOutcome, Session};

/// Maglev consistent-hashing simulator.
#[derive(Parser, Debug)]
#[command(name = "maglev-cli", about = "Google Maglev lookup-table simulator")]
struct Args {
    /// Execute commands from a file, then continue interactively if the
    /// file doesn't end with `quit`/`exit`.
    #[arg(short = 'C', value_name = "FILE")]
    command_file: Option<PathBuf>,

    /// A single command to execute once, then exit (e.g. `maglev-cli help`).
    #[arg(trailing_var_arg = true)]
    command: Vec<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    println!("Maglev Simulator");

    let mut session = Session::new();

    if !args.command.is_empty() {
        let line = args.command.join(" ");
        println!("Executing: {line}");
        match maglev::cli::command::parse_line(&line) {
            maglev::cli::command::ParseOutcome::Empty => {}
            maglev::cli::command::ParseOutcome::Message(msg) => println!("{msg}"),
            maglev::cli::command::ParseOutcome::Command(cmd) => {
                session.execute(cmd);
            }
        }
        return ExitCode::SUCCESS;
    }

    println!("Type 'help' for available commands, 'quit' to exit.");
    println!("Use UP/DOWN arrows to navigate command history.\n");

    if let Some(path) = &args.command_file {
        match run_batch_file(&mut session, path) {
            Ok(BatchOutcome::Quit) => return ExitCode::SUCCESS,
            Ok(BatchOutcome::Continue) => {
                println!("\n--- Entering interactive mode ---");
            }
            Err(err) => {
                eprintln!("Error: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    if let Err(err) = run_interactive(&mut session) {
        eprintln!("Error: {err}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
