use std::fmt;
use std::io::{self, Write};

/// ANSI colors
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const CLEAR_LINE: &str = "\r\x1b[2K";

const FG_BLUE: &str = "\x1b[34m";
const FG_GREEN: &str = "\x1b[32m";
const FG_YELLOW: &str = "\x1b[33m";
const FG_RED: &str = "\x1b[31m";
const FG_MAGENTA: &str = "\x1b[35m";

/// Icons
const ICON_INFO: &str = "ℹ️";
const ICON_OK: &str = "✅";
const ICON_WARN: &str = "⚠️";
const ICON_ERR: &str = "❌";
const ICON_ASK: &str = "✏️";

// Every message starts by wiping the status line the shell keeps rewriting.

pub fn info<T: fmt::Display>(msg: T) {
    println!("{CLEAR_LINE}{FG_BLUE}{BOLD}{ICON_INFO} {RESET}{msg}");
}

pub fn success<T: fmt::Display>(msg: T) {
    println!("{CLEAR_LINE}{FG_GREEN}{BOLD}{ICON_OK} {RESET}{msg}");
}

pub fn warning<T: fmt::Display>(msg: T) {
    println!("{CLEAR_LINE}{FG_YELLOW}{BOLD}{ICON_WARN} {RESET}{msg}");
}

pub fn error<T: fmt::Display>(msg: T) {
    eprintln!("{CLEAR_LINE}{FG_RED}{BOLD}{ICON_ERR} {RESET}{msg}");
}

/// A question the next input line answers; the cursor stays on the line.
pub fn ask<T: fmt::Display>(msg: T) {
    print!("{CLEAR_LINE}{FG_MAGENTA}{BOLD}{ICON_ASK} {RESET}{msg} ");
    let _ = io::stdout().flush();
}

/// Rewrites the single status line in place.
pub fn status<T: fmt::Display>(msg: T) {
    print!("{CLEAR_LINE}{msg}");
    let _ = io::stdout().flush();
}
