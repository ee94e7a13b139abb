use crate::cli::commands::{resolve_day, storage_for};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::DayLog;
use crate::errors::{AppError, AppResult};
use crate::storage::DayStorage;
use crate::ui::messages::success;
use crate::ui::input::record_index;
use crate::ui::render::record_line;
use tracing::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit { number, text, date } = cmd {
        let day = resolve_day(date)?;
        let storage = storage_for(cfg);
        let mut log = DayLog::from(storage.load(&day)?);

        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::EmptyDescription);
        }

        let index = record_index(*number, log.len())?;
        let label = log.all()[index].label.with_text(text);

        log.edit(index, label)?;
        storage.save(&day, log.all())?;
        info!(%day, index, "record edited from the command line");

        if let Some(record) = log.get(index) {
            success(format!("Updated {}", record_line(*number, record)));
        }
    }
    Ok(())
}
