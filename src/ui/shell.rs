//! Interactive event loop.
//!
//! A reader thread only forwards stdin lines; the session itself lives on
//! this thread and is touched from nowhere else. The loop sleeps until the
//! next tick is due or a line arrives, whichever comes first.

use super::input::{HELP, ShellCommand, record_index};
use super::messages::{ask, error, info, status, success, warning};
use super::render::{prompt_text, record_line, records_table, status_line};
use crate::core::{Clock, PromptResponse, Session, SessionEvent};
use crate::errors::AppResult;
use crate::storage::DayStorage;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::Instant;
use tracing::{debug, info as log_info};

fn spawn_stdin_reader() -> Receiver<String> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(line).is_err() {
                break;
            }
        }
    });
    rx
}

/// Runs an already started session until it ends.
pub fn run<S: DayStorage, C: Clock>(session: &mut Session<S, C>) -> AppResult<()> {
    let input = spawn_stdin_reader();
    info("Type `help` for commands.");

    loop {
        for event in session.drain_events() {
            present(session, &event);
        }
        if session.is_ended() {
            break;
        }

        let received = match session.time_until_next_tick(Instant::now()) {
            Some(wait) => input.recv_timeout(wait),
            None => input.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(line) => {
                if let Err(e) = handle_line(session, &line) {
                    error(e);
                }
            }
            Err(RecvTimeoutError::Timeout) => session.poll_ticks(Instant::now()),
            Err(RecvTimeoutError::Disconnected) => {
                log_info!("stdin closed, ending session");
                wind_down(session);
            }
        }
    }

    Ok(())
}

fn present<S: DayStorage, C: Clock>(session: &Session<S, C>, event: &SessionEvent) {
    match event {
        SessionEvent::Tick { remaining } => {
            if session.pending_prompt().is_none() {
                status(status_line(session.mode(), *remaining));
            }
        }
        SessionEvent::ModeChanged(mode) => info(format!("Now {mode}.")),
        SessionEvent::RecordAdded { index, record } => {
            success(record_line(index + 1, record));
        }
        SessionEvent::RecordChanged { index, .. } => {
            if let Some(record) = session.records().get(*index) {
                info(format!("Updated {}", record_line(index + 1, record)));
            }
        }
        SessionEvent::RecordRemoved { index } => info(format!("Deleted record #{}.", index + 1)),
        SessionEvent::PromptRequested(kind) => {
            println!();
            ask(prompt_text(*kind));
        }
        SessionEvent::Warning(msg) => warning(msg),
        SessionEvent::Terminated => success("Session over, today's log is saved."),
    }
}

fn handle_line<S: DayStorage, C: Clock>(session: &mut Session<S, C>, line: &str) -> AppResult<()> {
    if session.pending_prompt().is_some() {
        return session.respond(PromptResponse::from_input(line));
    }

    let command = ShellCommand::parse(line);
    debug!(?command, "shell command");

    match command {
        ShellCommand::Pause => session.pause(),
        ShellCommand::Resume(None) => session.request_resume(),
        ShellCommand::Resume(Some(reason)) => session.resume(&reason),
        ShellCommand::Switch => session.switch_task(),
        ShellCommand::End => session.end(),
        ShellCommand::List => {
            if session.records().is_empty() {
                info("No records yet today.");
            } else {
                println!("\r\n{}", records_table(session.records()));
            }
            Ok(())
        }
        ShellCommand::Edit { number, text } => {
            session.edit_record(record_index(number, session.records().len())?, &text)
        }
        ShellCommand::Delete { number } => {
            session.delete_record(record_index(number, session.records().len())?)
        }
        ShellCommand::Help => {
            println!("\r\n{HELP}");
            Ok(())
        }
        ShellCommand::Unknown(text) if text.is_empty() => Ok(()),
        ShellCommand::Unknown(text) => {
            warning(format!("Unknown command `{text}`, type `help`."));
            Ok(())
        }
    }
}

/// No more input will come: skip whatever is asked and close the session.
fn wind_down<S: DayStorage, C: Clock>(session: &mut Session<S, C>) {
    for _ in 0..4 {
        if session.is_ended() {
            return;
        }
        let step = if session.pending_prompt().is_some() {
            session.respond(PromptResponse::Cancelled)
        } else {
            session.end()
        };
        if let Err(e) = step {
            warning(e);
            return;
        }
    }
}
