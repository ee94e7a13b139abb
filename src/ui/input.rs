//! Parsing of the one-line commands typed during a session.

use crate::errors::{AppError, AppResult};
use regex::Regex;
use std::sync::LazyLock;

static EDIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:edit|e)\s+(\d+)\s+(.+)$").unwrap());
static DEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:del|delete|d)\s+(\d+)$").unwrap());
static RESUME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:resume|r)(?:\s+(.+))?$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Pause,
    /// `resume` alone asks for the reason; `resume <reason>` gives it inline.
    Resume(Option<String>),
    Switch,
    End,
    List,
    /// Record numbers as typed (1-based).
    Edit { number: usize, text: String },
    Delete { number: usize },
    Help,
    Unknown(String),
}

impl ShellCommand {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();

        if let Some(caps) = EDIT_RE.captures(line)
            && let Ok(number) = caps[1].parse()
        {
            return ShellCommand::Edit {
                number,
                text: caps[2].trim().to_string(),
            };
        }
        if let Some(caps) = DEL_RE.captures(line)
            && let Ok(number) = caps[1].parse()
        {
            return ShellCommand::Delete { number };
        }
        if let Some(caps) = RESUME_RE.captures(line) {
            return ShellCommand::Resume(caps.get(1).map(|m| m.as_str().trim().to_string()));
        }

        match line.to_lowercase().as_str() {
            "pause" | "p" => ShellCommand::Pause,
            "switch" | "s" => ShellCommand::Switch,
            "end" | "quit" | "q" => ShellCommand::End,
            "list" | "l" => ShellCommand::List,
            "help" | "h" | "?" => ShellCommand::Help,
            _ => ShellCommand::Unknown(line.to_string()),
        }
    }
}

/// Maps a 1-based record number to a store index for a log of `len` records.
pub fn record_index(number: usize, len: usize) -> AppResult<usize> {
    let index = number
        .checked_sub(1)
        .ok_or_else(|| AppError::Other("record numbers start at 1".to_string()))?;
    if index >= len {
        return Err(AppError::IndexOutOfRange { index, len });
    }
    Ok(index)
}

pub const HELP: &str = "\
Commands:
  pause | p              close the current period and pause
  resume | r [reason]    end the pause (asks for a reason if none given)
  switch | s             close the current period and restart the interval
  end | q                close the current period and exit
  list | l               show today's records
  edit <n> <text>        change the text of record n
  del <n>                delete record n
  help | h               this message
When asked a question, an empty line (or `!`) skips it.";
