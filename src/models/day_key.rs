use chrono::NaiveDate;
use std::fmt;

/// Identifies one calendar day's log (and its file on disk).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayKey(NaiveDate);

impl DayKey {
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    pub fn today() -> Self {
        Self(crate::utils::date::today())
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// `YYYYMMDD-worklog.csv`
    pub fn file_name(&self) -> String {
        format!("{}-worklog.csv", self.0.format("%Y%m%d"))
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}
