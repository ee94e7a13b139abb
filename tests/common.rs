#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rworklog::core::{ManualClock, PromptResponse, Session};
use rworklog::errors::{AppError, AppResult};
use rworklog::models::{DayKey, Record};
use rworklog::storage::DayStorage;
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::path::PathBuf;
use std::rc::Rc;

pub fn rwl() -> Command {
    cargo_bin_cmd!("rworklog")
}

pub fn day() -> DayKey {
    DayKey::new(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap())
}

pub fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
    day().date().and_hms_opt(h, m, s).unwrap()
}

pub fn t(h: u32, m: u32, s: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, s).unwrap()
}

/// In-memory day storage whose saves can be made to fail. Clones share
/// state, so a test can inspect what the session wrote.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    days: Rc<RefCell<HashMap<DayKey, Vec<Record>>>>,
    fail_saves: Rc<Cell<bool>>,
    corrupt: Rc<Cell<bool>>,
    saves: Rc<Cell<usize>>,
}

impl MemoryStorage {
    pub fn with_records(day: DayKey, records: Vec<Record>) -> Self {
        let storage = Self::default();
        storage.days.borrow_mut().insert(day, records);
        storage
    }

    pub fn stored(&self, day: &DayKey) -> Vec<Record> {
        self.days.borrow().get(day).cloned().unwrap_or_default()
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    pub fn set_corrupt(&self, corrupt: bool) {
        self.corrupt.set(corrupt);
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }
}

impl DayStorage for MemoryStorage {
    fn load(&self, day: &DayKey) -> AppResult<Vec<Record>> {
        if self.corrupt.get() {
            return Err(AppError::CorruptFile {
                path: PathBuf::from("memory"),
                reason: "garbage".to_string(),
            });
        }
        Ok(self.stored(day))
    }

    fn save(&self, day: &DayKey, records: &[Record]) -> AppResult<()> {
        if self.fail_saves.get() {
            return Err(AppError::Io(std::io::Error::other("disk full")));
        }
        self.saves.set(self.saves.get() + 1);
        self.days.borrow_mut().insert(*day, records.to_vec());
        Ok(())
    }
}

pub type TestSession = Session<MemoryStorage, ManualClock>;

/// A started session at 09:00:00 with the given intervals.
pub fn started(work: u32, rest: u32) -> (TestSession, MemoryStorage, ManualClock) {
    let storage = MemoryStorage::default();
    let clock = ManualClock::new(at(9, 0, 0));
    let mut session = Session::open(day(), storage.clone(), clock.clone());
    session.configure(work, rest).unwrap();
    session.start().unwrap();
    session.drain_events();
    (session, storage, clock)
}

/// Ticks `n` times, moving the clock one second per tick.
pub fn run_ticks(session: &mut TestSession, clock: &ManualClock, n: u32) {
    for _ in 0..n {
        clock.advance_secs(1);
        session.tick();
    }
}

pub fn answer(session: &mut TestSession, text: &str) {
    session
        .respond(PromptResponse::Text(text.to_string()))
        .unwrap();
}
