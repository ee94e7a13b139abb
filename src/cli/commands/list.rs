use crate::cli::commands::{resolve_day, storage_for};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::{Label, Record};
use crate::storage::DayStorage;
use crate::ui::render::records_table;
use crate::utils::time::readable_minutes;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { date } = cmd {
        let day = resolve_day(date)?;
        let records = storage_for(cfg).load(&day)?;

        if records.is_empty() {
            println!("No records for {day}");
            return Ok(());
        }

        println!("\n=== {day} ===");
        print!("{}", records_table(&records));
        print_totals(&records);
    }
    Ok(())
}

fn print_totals(records: &[Record]) {
    let (mut logged, mut paused) = (0.0, 0.0);
    for record in records {
        match &record.label {
            Label::Activity(_) => logged += record.period.minutes(),
            Label::Pause { minutes, .. } => paused += minutes,
        }
    }
    println!(
        "\nRecords: {} | Logged: {} | Paused: {}",
        records.len(),
        readable_minutes(logged),
        readable_minutes(paused)
    );
}
