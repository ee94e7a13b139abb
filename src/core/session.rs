//! Session state machine.
//!
//! A `Session` owns everything that changes while tracking: the mode, the
//! countdown, the open period's start and the day log. Ticks and user
//! commands arrive one at a time on the caller's thread; prompts are not
//! blocking calls but an explicit stop of the scheduler, an outstanding
//! [`Prompt`], and a restart once [`Session::respond`] runs.

use super::clock::Clock;
use super::events::{Continuation, Prompt, PromptKind, PromptResponse, SessionEvent};
use super::scheduler::Scheduler;
use super::store::DayLog;
use crate::errors::{AppError, AppResult};
use crate::models::{DayKey, Mode, Period, Record, Segment};
use crate::storage::DayStorage;
use chrono::NaiveDateTime;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const WORK_MINUTES_RANGE: std::ops::RangeInclusive<u32> = 1..=120;
pub const REST_MINUTES_RANGE: std::ops::RangeInclusive<u32> = 1..=60;

/// Work and rest lengths, fixed for the lifetime of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intervals {
    work_secs: u32,
    rest_secs: u32,
}

impl Intervals {
    pub fn from_minutes(work: u32, rest: u32) -> AppResult<Self> {
        if !WORK_MINUTES_RANGE.contains(&work) {
            return Err(AppError::InvalidConfig(format!(
                "work interval must be {}-{} minutes, got {work}",
                WORK_MINUTES_RANGE.start(),
                WORK_MINUTES_RANGE.end()
            )));
        }
        if !REST_MINUTES_RANGE.contains(&rest) {
            return Err(AppError::InvalidConfig(format!(
                "rest interval must be {}-{} minutes, got {rest}",
                REST_MINUTES_RANGE.start(),
                REST_MINUTES_RANGE.end()
            )));
        }
        Ok(Self {
            work_secs: work * 60,
            rest_secs: rest * 60,
        })
    }

    pub fn work_secs(&self) -> u32 {
        self.work_secs
    }

    pub fn rest_secs(&self) -> u32 {
        self.rest_secs
    }

    pub fn secs_for(&self, segment: Segment) -> u32 {
        match segment {
            Segment::Work => self.work_secs,
            Segment::Rest => self.rest_secs,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Created,
    Running,
    Ended,
}

pub struct Session<S: DayStorage, C: Clock> {
    day: DayKey,
    log: DayLog,
    storage: S,
    clock: C,
    scheduler: Scheduler,
    intervals: Option<Intervals>,
    lifecycle: Lifecycle,
    segment: Segment,
    remaining: u32,
    last_boundary: Option<NaiveDateTime>,
    paused_at: Option<NaiveDateTime>,
    pending: Option<Prompt>,
    /// Set when the last save failed; cleared by the next successful one.
    unsaved: bool,
    events: Vec<SessionEvent>,
}

impl<S: DayStorage, C: Clock> Session<S, C> {
    /// Creates a session for `day`, picking up whatever was already logged.
    ///
    /// An unreadable day file is moved aside and the day starts empty; the
    /// problem is reported as a `Warning` event rather than an error.
    pub fn open(day: DayKey, storage: S, clock: C) -> Self {
        let mut events = Vec::new();

        let records = match storage.load(&day) {
            Ok(records) => records,
            Err(err @ AppError::CorruptFile { .. }) => {
                warn!(%day, error = %err, "starting with an empty day log");
                let moved = match storage.quarantine(&day) {
                    Ok(Some(path)) => format!(" (kept as {})", path.display()),
                    Ok(None) => String::new(),
                    Err(e) => {
                        warn!(%day, error = %e, "could not move the corrupt file aside");
                        String::new()
                    }
                };
                events.push(SessionEvent::Warning(format!(
                    "{err}; starting with an empty log{moved}"
                )));
                Vec::new()
            }
            Err(err) => {
                warn!(%day, error = %err, "day log unreadable, starting empty");
                events.push(SessionEvent::Warning(format!(
                    "Could not read the log for {day}: {err}"
                )));
                Vec::new()
            }
        };

        Self {
            day,
            log: DayLog::from(records),
            storage,
            clock,
            scheduler: Scheduler::default(),
            intervals: None,
            lifecycle: Lifecycle::Created,
            segment: Segment::Work,
            remaining: 0,
            last_boundary: None,
            paused_at: None,
            pending: None,
            unsaved: false,
            events,
        }
    }

    // ---------------------------
    // Accessors
    // ---------------------------

    pub fn day(&self) -> DayKey {
        self.day
    }

    pub fn mode(&self) -> Mode {
        if self.paused_at.is_some() {
            Mode::Paused
        } else {
            self.segment.mode()
        }
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining
    }

    pub fn intervals(&self) -> Option<Intervals> {
        self.intervals
    }

    pub fn records(&self) -> &[Record] {
        self.log.all()
    }

    pub fn pending_prompt(&self) -> Option<Prompt> {
        self.pending
    }

    pub fn last_boundary(&self) -> Option<NaiveDateTime> {
        self.last_boundary
    }

    pub fn paused_at(&self) -> Option<NaiveDateTime> {
        self.paused_at
    }

    pub fn is_started(&self) -> bool {
        self.lifecycle != Lifecycle::Created
    }

    pub fn is_ticking(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn is_ended(&self) -> bool {
        self.lifecycle == Lifecycle::Ended
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Everything queued for the shell since the last call.
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.scheduler.time_until_next(now)
    }

    // ---------------------------
    // Lifecycle
    // ---------------------------

    pub fn configure(&mut self, work_minutes: u32, rest_minutes: u32) -> AppResult<()> {
        self.ensure_not_ended()?;
        if self.intervals.is_some() || self.lifecycle != Lifecycle::Created {
            return Err(AppError::AlreadyConfigured);
        }
        let intervals = Intervals::from_minutes(work_minutes, rest_minutes)?;
        info!(work_minutes, rest_minutes, "intervals configured");
        self.intervals = Some(intervals);
        Ok(())
    }

    pub fn start(&mut self) -> AppResult<()> {
        self.ensure_not_ended()?;
        if self.lifecycle != Lifecycle::Created {
            return Err(AppError::InvalidTransition {
                operation: "start",
                mode: self.mode(),
            });
        }
        let intervals = self.intervals.ok_or(AppError::NotConfigured)?;

        self.lifecycle = Lifecycle::Running;
        self.segment = Segment::Work;
        self.remaining = intervals.work_secs();
        self.last_boundary = Some(self.clock.now());
        info!(day = %self.day, remaining = self.remaining, "session started");

        self.events.push(SessionEvent::ModeChanged(self.mode()));
        self.resume_ticking();
        Ok(())
    }

    /// One scheduler tick. Does nothing unless the countdown is live.
    pub fn tick(&mut self) {
        if self.lifecycle != Lifecycle::Running
            || self.paused_at.is_some()
            || !self.scheduler.is_running()
        {
            return;
        }

        self.remaining = self.remaining.saturating_sub(1);
        self.events.push(SessionEvent::Tick {
            remaining: self.remaining,
        });

        if self.remaining == 0 {
            self.interval_expired();
        }
    }

    /// Feeds every tick that came due by `now`. Stops at an expiry, since the
    /// scheduler is halted while the prompt is open.
    pub fn poll_ticks(&mut self, now: Instant) {
        while self.scheduler.take_due(now) {
            self.tick();
        }
    }

    /// The running interval is over: stop the clock and ask what was done.
    pub fn interval_expired(&mut self) {
        if self.lifecycle != Lifecycle::Running
            || self.paused_at.is_some()
            || self.pending.is_some()
        {
            return;
        }
        debug!(mode = %self.mode(), "interval expired");
        self.request(PromptKind::Activity, Continuation::NextSegment);
    }

    pub fn pause(&mut self) -> AppResult<()> {
        self.ensure_active("pause")?;
        self.request(PromptKind::Activity, Continuation::Pause);
        Ok(())
    }

    /// Asks for the pause reason; answering it resumes the session.
    pub fn request_resume(&mut self) -> AppResult<()> {
        self.ensure_paused("resume")?;
        self.request(PromptKind::PauseReason, Continuation::Resume);
        Ok(())
    }

    /// Leaves Paused, recording the pause even when `reason` is empty.
    pub fn resume(&mut self, reason: &str) -> AppResult<()> {
        self.ensure_not_ended()?;
        match self.pending {
            Some(Prompt {
                then: Continuation::Resume,
                ..
            }) => self.pending = None,
            Some(prompt) => return Err(AppError::PromptPending(prompt.kind)),
            None => {}
        }
        self.ensure_paused("resume")?;
        self.close_pause(reason);
        self.restart_segment(self.segment);
        info!(mode = %self.mode(), remaining = self.remaining, "mode changed");
        self.events.push(SessionEvent::ModeChanged(self.mode()));
        Ok(())
    }

    /// Closes the current period now and starts the same segment over.
    pub fn switch_task(&mut self) -> AppResult<()> {
        self.ensure_active("switch task")?;
        self.request(PromptKind::Activity, Continuation::Restart);
        Ok(())
    }

    /// Final flush: one last prompt, then the session is over.
    pub fn end(&mut self) -> AppResult<()> {
        self.ensure_not_ended()?;
        if let Some(prompt) = self.pending {
            return Err(AppError::PromptPending(prompt.kind));
        }

        match self.lifecycle {
            Lifecycle::Created => {
                self.finish();
            }
            _ if self.paused_at.is_some() => {
                self.request(PromptKind::PauseReason, Continuation::End);
            }
            _ => {
                self.request(PromptKind::Activity, Continuation::End);
            }
        }
        Ok(())
    }

    /// Answers the outstanding prompt and carries out what was waiting on it.
    pub fn respond(&mut self, response: PromptResponse) -> AppResult<()> {
        self.ensure_not_ended()?;
        let prompt = self.pending.take().ok_or(AppError::NoPendingPrompt)?;
        let before = self.mode();

        match prompt.kind {
            PromptKind::Activity => {
                let now = self.clock.now();
                match &response {
                    PromptResponse::Text(text) if !text.trim().is_empty() => {
                        self.close_activity(text, now);
                    }
                    _ => debug!("activity prompt cancelled, period left unlabeled"),
                }
                self.last_boundary = Some(now);
            }
            PromptKind::PauseReason => {
                let reason = match &response {
                    PromptResponse::Text(text) => text.as_str(),
                    PromptResponse::Cancelled => "",
                };
                self.close_pause(reason);
            }
        }

        match prompt.then {
            Continuation::NextSegment => self.restart_segment(self.segment.flipped()),
            Continuation::Restart | Continuation::Resume => self.restart_segment(self.segment),
            Continuation::Pause => {
                let now = self.clock.now();
                self.paused_at = Some(now);
                info!(at = %now, "session paused");
            }
            Continuation::End => self.finish(),
        }

        if !self.is_ended() && self.mode() != before {
            info!(mode = %self.mode(), remaining = self.remaining, "mode changed");
            self.events.push(SessionEvent::ModeChanged(self.mode()));
        }
        Ok(())
    }

    // ---------------------------
    // Direct record edits
    // ---------------------------

    /// Changes the text of a record, keeping its kind and period.
    pub fn edit_record(&mut self, index: usize, text: &str) -> AppResult<()> {
        self.ensure_not_ended()?;
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::EmptyDescription);
        }
        let label = self
            .log
            .get(index)
            .map(|r| r.label.with_text(text))
            .ok_or(AppError::IndexOutOfRange {
                index,
                len: self.log.len(),
            })?;

        self.log.edit(index, label.clone())?;
        info!(index, "record edited");
        self.events.push(SessionEvent::RecordChanged { index, label });
        self.persist();
        Ok(())
    }

    pub fn delete_record(&mut self, index: usize) -> AppResult<()> {
        self.ensure_not_ended()?;
        let removed = self.log.delete(index)?;
        info!(index, record = %removed, "record deleted");
        self.events.push(SessionEvent::RecordRemoved { index });
        self.persist();
        Ok(())
    }

    // ---------------------------
    // Internals
    // ---------------------------

    fn ensure_not_ended(&self) -> AppResult<()> {
        if self.lifecycle == Lifecycle::Ended {
            return Err(AppError::SessionEnded);
        }
        Ok(())
    }

    /// Running, not paused, nothing outstanding.
    fn ensure_active(&self, operation: &'static str) -> AppResult<()> {
        self.ensure_not_ended()?;
        if let Some(prompt) = self.pending {
            return Err(AppError::PromptPending(prompt.kind));
        }
        if self.lifecycle != Lifecycle::Running || self.paused_at.is_some() {
            return Err(AppError::InvalidTransition {
                operation,
                mode: self.mode(),
            });
        }
        Ok(())
    }

    fn ensure_paused(&self, operation: &'static str) -> AppResult<()> {
        self.ensure_not_ended()?;
        if let Some(prompt) = self.pending {
            return Err(AppError::PromptPending(prompt.kind));
        }
        if self.paused_at.is_none() {
            return Err(AppError::InvalidTransition {
                operation,
                mode: self.mode(),
            });
        }
        Ok(())
    }

    fn request(&mut self, kind: PromptKind, then: Continuation) {
        self.scheduler.stop();
        self.pending = Some(Prompt { kind, then });
        debug!(%kind, ?then, "prompt requested");
        self.events.push(SessionEvent::PromptRequested(kind));
    }

    fn resume_ticking(&mut self) {
        self.scheduler.start(Instant::now());
        self.events.push(SessionEvent::Tick {
            remaining: self.remaining,
        });
    }

    fn restart_segment(&mut self, segment: Segment) {
        let Some(intervals) = self.intervals else {
            return;
        };
        self.segment = segment;
        self.paused_at = None;
        self.remaining = intervals.secs_for(segment);
        self.resume_ticking();
    }

    fn close_activity(&mut self, text: &str, now: NaiveDateTime) {
        let start = self.last_boundary.unwrap_or(now);
        let record = Record::activity(Period::between(start, now), text.trim());
        self.add_record(record);
    }

    /// Records the pause that ends now and moves the boundary past it.
    fn close_pause(&mut self, reason: &str) {
        let now = self.clock.now();
        let Some(paused_at) = self.paused_at else {
            return;
        };
        let minutes = (now - paused_at).num_milliseconds().max(0) as f64 / 60_000.0;
        let record = Record::pause(Period::between(paused_at, now), reason.trim(), minutes);
        info!(minutes, "pause closed");
        self.add_record(record);
        self.paused_at = None;
        self.last_boundary = Some(now);
    }

    fn add_record(&mut self, record: Record) {
        if self.log.append(record.clone()) {
            let index = self.log.len() - 1;
            info!(index, %record, "record added");
            self.events.push(SessionEvent::RecordAdded { index, record });
            self.persist();
        }
    }

    fn finish(&mut self) {
        if self.unsaved {
            self.persist();
        }
        self.scheduler.stop();
        self.lifecycle = Lifecycle::Ended;
        self.pending = None;
        info!(day = %self.day, records = self.log.len(), "session ended");
        self.events.push(SessionEvent::Terminated);
    }

    /// Write-through: the whole day is rewritten after every mutation. A
    /// failure leaves memory untouched so the next mutation, or the end of
    /// the session, retries it all.
    fn persist(&mut self) {
        match self.storage.save(&self.day, self.log.all()) {
            Ok(()) => {
                self.unsaved = false;
                debug!(day = %self.day, "day log persisted");
            }
            Err(e) => {
                self.unsaved = true;
                warn!(day = %self.day, error = %e, "could not save day log");
                self.events
                    .push(SessionEvent::Warning(format!("Could not save the log: {e}")));
            }
        }
    }
}
