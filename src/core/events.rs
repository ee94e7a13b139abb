//! Messages between the session and whatever presents it.

use crate::models::{Label, Mode, Record};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    /// "What did you do in this period?"
    Activity,
    /// "Why did you pause?"
    PauseReason,
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptKind::Activity => f.write_str("activity"),
            PromptKind::PauseReason => f.write_str("pause reason"),
        }
    }
}

/// What the session does once the outstanding prompt is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Continuation {
    /// Interval expired: switch Working <-> Resting.
    NextSegment,
    /// Task switch: start the same segment over.
    Restart,
    /// Enter Paused.
    Pause,
    /// Leave Paused.
    Resume,
    /// Stop for good.
    End,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub then: Continuation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptResponse {
    Text(String),
    Cancelled,
}

impl PromptResponse {
    /// Whitespace-only input is treated as a cancel.
    pub fn from_input(line: &str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed == "!" {
            PromptResponse::Cancelled
        } else {
            PromptResponse::Text(trimmed.to_string())
        }
    }
}

/// Notifications queued by the session for the presentation shell.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Tick { remaining: u32 },
    ModeChanged(Mode),
    RecordAdded { index: usize, record: Record },
    RecordChanged { index: usize, label: Label },
    RecordRemoved { index: usize },
    PromptRequested(PromptKind),
    /// Something went wrong but the session carries on (failed save, bad file).
    Warning(String),
    Terminated,
}
