use crate::models::{Label, Record};
use crate::utils::time::format_clock;
use serde::Serialize;

/// Flat, self-describing row for exports.
#[derive(Debug, Clone, Serialize)]
pub struct RecordExport {
    pub number: usize,
    pub start: String,
    pub end: String,
    pub kind: &'static str,
    pub text: String,
    pub pause_minutes: Option<f64>,
    pub duration_minutes: f64,
}

impl RecordExport {
    pub fn from_record(number: usize, record: &Record) -> Self {
        let pause_minutes = match &record.label {
            Label::Pause { minutes, .. } => Some(*minutes),
            Label::Activity(_) => None,
        };
        Self {
            number,
            start: format_clock(record.period.start()),
            end: format_clock(record.period.end()),
            kind: record.label.kind_str(),
            text: record.label.text().to_string(),
            pause_minutes,
            duration_minutes: record.period.minutes(),
        }
    }

    pub fn from_records(records: &[Record]) -> Vec<Self> {
        records
            .iter()
            .enumerate()
            .map(|(i, r)| Self::from_record(i + 1, r))
            .collect()
    }
}
