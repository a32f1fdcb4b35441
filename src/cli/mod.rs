//! The external command shell: argument parsing, the interactive prompt,
//! batch-file execution, and table rendering. None of this is part of the
//! core's contract (spec.md §1) — it is a thin, replaceable wrapper
//! around `crate::table::MaglevTable`.

pub mod command;
pub mod display;
pub mod shell;
