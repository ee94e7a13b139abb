//! Durable per-day storage for the day log.

mod csv_store;

pub use csv_store::CsvDayStorage;

use crate::errors::AppResult;
use crate::models::{DayKey, Record};
use std::path::PathBuf;

pub trait DayStorage {
    /// Records persisted for `day`, in file order. A missing or empty file is
    /// an empty day; an unparseable one is `AppError::CorruptFile`.
    fn load(&self, day: &DayKey) -> AppResult<Vec<Record>>;

    /// Replaces everything persisted for `day` with `records`.
    fn save(&self, day: &DayKey, records: &[Record]) -> AppResult<()>;

    /// Moves an unreadable day file out of the way so the next save cannot
    /// overwrite it. Returns where it went, if anywhere.
    fn quarantine(&self, _day: &DayKey) -> AppResult<Option<PathBuf>> {
        Ok(None)
    }
}
