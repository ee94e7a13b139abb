//! Unified application error type.
//! Every module (core, storage, export, cli, ui) returns AppError so the
//! shell and `main` only ever have one kind of failure to report.

use crate::core::events::PromptKind;
use crate::models::mode::Mode;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO / encoding
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    // ---------------------------
    // Persistence
    // ---------------------------
    #[error("Corrupt day file {}: {reason}", .path.display())]
    CorruptFile { path: PathBuf, reason: String },

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    // ---------------------------
    // Record store
    // ---------------------------
    #[error("No record #{} (the log has {len} records)", .index.saturating_add(1))]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Description must not be empty")]
    EmptyDescription,

    // ---------------------------
    // Session state machine
    // ---------------------------
    #[error("Invalid interval configuration: {0}")]
    InvalidConfig(String),

    #[error("Intervals are already configured")]
    AlreadyConfigured,

    #[error("Intervals must be configured before starting")]
    NotConfigured,

    #[error("Cannot {operation} while {mode}")]
    InvalidTransition { operation: &'static str, mode: Mode },

    #[error("Answer the pending {0} prompt first")]
    PromptPending(PromptKind),

    #[error("There is no prompt waiting for an answer")]
    NoPendingPrompt,

    #[error("The session has ended")]
    SessionEnded,

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
