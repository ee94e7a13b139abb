//! Text rendering of session state and records.

use crate::core::PromptKind;
use crate::models::{Label, Mode, Record};
use crate::utils::colors::{colour_for_mode, paint_label};
use crate::utils::format_hms;
use crate::utils::table::{Column, Table};
use crate::utils::time::readable_minutes;

pub fn status_line(mode: Mode, remaining: u32) -> String {
    let tag = colour_for_mode(mode).bold().paint(format!("[{mode}]"));
    match mode {
        Mode::Paused => format!("{tag} type `resume` to continue"),
        _ => format!("{tag} {} remaining", format_hms(remaining)),
    }
}

pub fn prompt_text(kind: PromptKind) -> &'static str {
    match kind {
        PromptKind::Activity => "What did you do in this period?",
        PromptKind::PauseReason => "Why did you pause?",
    }
}

/// `#3 09:00:00 - 09:45:00 wrote the parser`
pub fn record_line(number: usize, record: &Record) -> String {
    let text = record.label.to_string();
    format!(
        "#{number} {} {}",
        record.period,
        paint_label(&record.label, &text)
    )
}

/// Full table of a day's records with 1-based numbers.
pub fn records_table(records: &[Record]) -> String {
    let mut table = Table::new(vec![
        Column::new("#", 3),
        Column::new("Period", 19),
        Column::new("Kind", 8),
        Column::new("Length", 6),
        Column::new("Description", 48),
    ]);

    for (i, record) in records.iter().enumerate() {
        let length = match &record.label {
            Label::Pause { minutes, .. } => readable_minutes(*minutes),
            Label::Activity(_) => readable_minutes(record.period.minutes()),
        };
        table.add_row(vec![
            (i + 1).to_string(),
            record.period.to_string(),
            record.label.kind_str().to_string(),
            length,
            record.label.text().to_string(),
        ]);
    }

    table.fit_columns();
    table.render()
}
