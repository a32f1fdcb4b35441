//! Interactive shell and batch-file runner, reproducing the loop
//! structure of `original_source/src/main.c`'s `main`/
//! `execute_commands_from_file`, with `rustyline` standing in for the
//! reference's libreadline FFI.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use crate::cli::command::{parse_line, Command, ParseOutcome};
use crate::cli::display::{render_nodes, render_table};
use crate::error::MaglevError;
use crate::table::MaglevTable;

/// History is capped at 100 entries, matching the reference's
/// `stifle_history(100)`.
const HISTORY_LIMIT: usize = 100;

/// Whether a batch run should continue into interactive mode afterward.
pub enum BatchOutcome {
    Continue,
    Quit,
}

/// Mutable session state threaded through command dispatch: the table is
/// absent until the first successful `init`, exactly like the reference's
/// `g_maglev.is_initialized` flag.
pub struct Session {
    table: Option<MaglevTable>,
}

impl Session {
    pub fn new() -> Self {
        Session { table: None }
    }

    /// Executes one command, printing results the way `main.c` does.
    /// Returns `true` if the caller should keep going, `false` on `quit`.
    pub fn execute(&mut self, command: Command) -> bool {
        match command {
            Command::Init(size) => {
                let table = MaglevTable::init(size);
                println!("Maglev table initialized with size: {}", table.size());
                self.table = Some(table);
            }
            Command::Add(name) => match self.with_table_mut(|t| t.add(&name)) {
                Ok(Ok(())) => println!("Node '{name}' added successfully"),
                Ok(Err(err)) => println!("Error: {err}"),
                Err(err) => println!("Error: {err}"),
            },
            Command::Del(name) => match self.with_table_mut(|t| {
                t.remove(&name);
                Ok::<(), MaglevError>(())
            }) {
                Ok(Ok(())) => println!("Node '{name}' removed successfully"),
                Ok(Err(err)) | Err(err) => println!("Error: {err}"),
            },
            Command::ShowNodes => match &self.table {
                Some(table) => print!("{}", render_nodes(table)),
                None => println!("Maglev table not initialized"),
            },
            Command::ShowMaglev => match &self.table {
                Some(table) => print!("{}", render_table(table, false)),
                None => println!("Maglev table not initialized"),
            },
            Command::ShowMaglevColor => match &self.table {
                Some(table) => print!("{}", render_table(table, true)),
                None => println!("Maglev table not initialized"),
            },
            Command::Help => print_help(),
            Command::Quit => {
                println!("Goodbye!");
                return false;
            }
        }
        true
    }

    fn with_table_mut<T>(
        &mut self,
        f: impl FnOnce(&mut MaglevTable) -> Result<T, MaglevError>,
    ) -> Result<Result<T, MaglevError>, MaglevError> {
        match &mut self.table {
            Some(table) => Ok(f(table)),
            None => Err(MaglevError::Uninitialized),
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

fn print_help() {
    println!(
        "\nMaglev Simulator Commands:\n\
         \x20 init <size>          - Initialize lookup table with given size\n\
         \x20 add <name>           - Add a new node (error if exists)\n\
         \x20 del <name>           - Delete a node (ignore if not exists)\n\
         \x20 show nodes           - Show current nodes\n\
         \x20 show maglev          - Show complete maglev lookup table\n\
         \x20 show maglev-color    - Show maglev lookup table with colored nodes\n\
         \x20 help                 - Show this help message\n\
         \x20 quit/exit            - Exit the simulator\n"
    );
}

/// Feeds one line through the parser and the session, printing a parse
/// message (usage hint / unknown command) when there's no command to run.
/// Returns `false` once `quit`/`exit` has run.
fn dispatch_line(session: &mut Session, line: &str) -> bool {
    match parse_line(line) {
        ParseOutcome::Empty => true,
        ParseOutcome::Message(msg) => {
            println!("{msg}");
            true
        }
        ParseOutcome::Command(cmd) => session.execute(cmd),
    }
}

/// Runs commands from a batch file: blank lines and `#`-comments are
/// skipped, each executed line is echoed as `> <line>` first, and a
/// `quit`/`exit` line stops the file (and the whole run) immediately.
pub fn run_batch_file(session: &mut Session, path: &Path) -> Result<BatchOutcome> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("cannot open file '{}'", path.display()))?;
    println!("Executing commands from file: {}", path.display());

    for raw_line in contents.lines() {
        let line = raw_line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        println!("> {line}");
        if !dispatch_line(session, line) {
            return Ok(BatchOutcome::Quit);
        }
    }
    Ok(BatchOutcome::Continue)
}

/// Runs the interactive `rustyline`-backed prompt loop until `quit`/`exit`
/// or EOF (Ctrl-D).
pub fn run_interactive(session: &mut Session) -> Result<()> {
    let history_path = history_file_path();
    let mut editor = DefaultEditor::new().context("failed to start the line editor")?;
    if let Some(path) = &history_path {
        let _ = editor.load_history(path);
    }

    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    let _ = editor.add_history_entry(trimmed);
                }
                if !dispatch_line(session, trimmed) {
                    break;
                }
            }
            Err(ReadlineError::Eof) => {
                println!("\nGoodbye!");
                break;
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(err) => return Err(err.into()),
        }
    }

    if let Some(path) = &history_path {
        let _ = editor.history_mut().set_max_len(HISTORY_LIMIT);
        let _ = editor.save_history(path);
    }
    Ok(())
}

fn history_file_path() -> Option<std::path::PathBuf> {
    std::env::var_os("HOME").map(|home| Path::new(&home).join(".maglev_history"))
}
