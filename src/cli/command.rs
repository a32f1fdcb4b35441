//! Parsing for the command surface reproduced from
//! `original_source/src/main.c`'s `identify_command`/`parse_arguments`.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Init(u32),
    Add(String),
    Del(String),
    ShowNodes,
    ShowMaglev,
    ShowMaglevColor,
    Help,
    Quit,
}

/// Outcome of parsing one line of input.
pub enum ParseOutcome {
    /// Blank line; nothing to do.
    Empty,
    /// A recognized command, ready to execute.
    Command(Command),
    /// Not an error worth aborting over — a usage hint or "unknown
    /// command" message to print and move on, exactly as the reference
    /// shell does.
    Message(String),
}

/// Splits a line on whitespace and identifies the command, mirroring
/// `parse_arguments` + `identify_command` + the per-command usage checks
/// in `main.c`.
pub fn parse_line(line: &str) -> ParseOutcome {
    let args: Vec<&str> = line.split_whitespace().collect();
    let Some(&head) = args.first() else {
        return ParseOutcome::Empty;
    };

    match head {
        "init" => match args.get(1) {
            Some(size) if args.len() == 2 => match size.parse::<u32>() {
                Ok(0) | Err(_) => ParseOutcome::Message(format!("Error: Invalid table size '{size}'")),
                Ok(n) => ParseOutcome::Command(Command::Init(n)),
            },
            _ => ParseOutcome::Message("Usage: init <table_size>".to_string()),
        },
        "add" => match args.get(1) {
            Some(name) if args.len() == 2 => {
                ParseOutcome::Command(Command::Add((*name).to_string()))
            }
            _ => ParseOutcome::Message("Usage: add <node_name>".to_string()),
        },
        "del" => match args.get(1) {
            Some(name) if args.len() == 2 => {
                ParseOutcome::Command(Command::Del((*name).to_string()))
            }
            _ => ParseOutcome::Message("Usage: del <node_name>".to_string()),
        },
        "show" => match args.get(1).copied() {
            Some("nodes") if args.len() == 2 => ParseOutcome::Command(Command::ShowNodes),
            Some("maglev") if args.len() == 2 => ParseOutcome::Command(Command::ShowMaglev),
            Some("maglev-color") if args.len() == 2 => {
                ParseOutcome::Command(Command::ShowMaglevColor)
            }
            _ => ParseOutcome::Message("Usage: show <nodes|maglev|maglev-color>".to_string()),
        },
        "help" => ParseOutcome::Command(Command::Help),
        "quit" | "exit" => ParseOutcome::Command(Command::Quit),
        other => ParseOutcome::Message(format!(
            "Unknown command: {other}\nType 'help' for available commands."
        )),
    }
}
