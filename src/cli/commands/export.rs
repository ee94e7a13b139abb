use crate::cli::commands::{resolve_day, storage_for};
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::storage::DayStorage;
use crate::utils::path::expand_tilde;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        date,
        force,
    } = cmd
    {
        let day = resolve_day(date)?;
        let records = storage_for(cfg).load(&day)?;
        ExportLogic::export(&day, &records, *format, &expand_tilde(file), *force)?;
    }
    Ok(())
}
