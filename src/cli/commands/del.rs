use crate::cli::commands::{resolve_day, storage_for};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::DayLog;
use crate::errors::AppResult;
use crate::storage::DayStorage;
use crate::ui::messages::{info, success, warning};
use crate::ui::input::record_index;
use crate::ui::render::record_line;

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { number, date, yes } = cmd {
        let day = resolve_day(date)?;
        let storage = storage_for(cfg);
        let mut log = DayLog::from(storage.load(&day)?);

        let index = record_index(*number, log.len())?;
        let record = log.all()[index].clone();

        //
        // Confirmation prompt
        //
        let prompt = format!(
            "Delete {} from {day}? This action is irreversible.",
            record_line(*number, &record)
        );
        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        log.delete(index)?;
        storage.save(&day, log.all())?;
        tracing::info!(%day, index, "record deleted from the command line");
        success(format!("Record #{number} for {day} has been deleted."));
    }

    Ok(())
}
