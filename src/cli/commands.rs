pub mod config;
pub mod del;
pub mod edit;
pub mod export;
pub mod list;
pub mod start;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::DayKey;
use crate::storage::CsvDayStorage;
use crate::utils::date;

/// `--date` if given, today otherwise.
pub(crate) fn resolve_day(date_arg: &Option<String>) -> AppResult<DayKey> {
    match date_arg {
        Some(s) => date::parse_date(s)
            .map(DayKey::new)
            .ok_or_else(|| AppError::InvalidDate(s.clone())),
        None => Ok(DayKey::today()),
    }
}

pub(crate) fn storage_for(cfg: &Config) -> CsvDayStorage {
    CsvDayStorage::new(cfg.data_path())
}
