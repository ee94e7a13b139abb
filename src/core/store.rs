//! In-memory day log: the ordered list of records for one day.

use crate::errors::{AppError, AppResult};
use crate::models::{Label, Record};
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayLog {
    records: Vec<Record>,
}

impl DayLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends at the end unless an identical record (same period and label)
    /// is already present. Returns whether the record was inserted.
    pub fn append(&mut self, record: Record) -> bool {
        if self.records.contains(&record) {
            debug!(%record, "duplicate record ignored");
            return false;
        }
        self.records.push(record);
        true
    }

    /// Replaces the label of the record at `index`; its period never changes.
    pub fn edit(&mut self, index: usize, label: Label) -> AppResult<()> {
        let len = self.records.len();
        let record = self
            .records
            .get_mut(index)
            .ok_or(AppError::IndexOutOfRange { index, len })?;
        record.label = label;
        Ok(())
    }

    pub fn delete(&mut self, index: usize) -> AppResult<Record> {
        if index >= self.records.len() {
            return Err(AppError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        Ok(self.records.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl From<Vec<Record>> for DayLog {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}
