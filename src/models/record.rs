use crate::errors::{AppError, AppResult};
use chrono::{NaiveDateTime, NaiveTime, Timelike};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::sync::LazyLock;

static PERIOD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{1,2}:\d{2}:\d{2})\s*-\s*(\d{1,2}:\d{2}:\d{2})\s*$").unwrap()
});

const TIME_FMT: &str = "%H:%M:%S";

/// A closed wall-clock interval inside one day, at whole-second precision.
/// `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    start: NaiveTime,
    end: NaiveTime,
}

fn whole_seconds(t: NaiveTime) -> NaiveTime {
    t.with_nanosecond(0).unwrap_or(t)
}

impl Period {
    pub fn new(start: NaiveTime, end: NaiveTime) -> AppResult<Self> {
        let (start, end) = (whole_seconds(start), whole_seconds(end));
        if start > end {
            return Err(AppError::InvalidPeriod(format!(
                "{} is after {}",
                start.format(TIME_FMT),
                end.format(TIME_FMT)
            )));
        }
        Ok(Self { start, end })
    }

    /// Builds the period closed by two clock readings.
    ///
    /// An end on a later day is clamped to the last second of the start day,
    /// and a clock that went backwards gives a zero-length period.
    pub fn between(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        let start_t = whole_seconds(start.time());
        let end_t = match end.date().cmp(&start.date()) {
            Ordering::Greater => NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(start_t),
            Ordering::Less => start_t,
            Ordering::Equal => whole_seconds(end.time()),
        };
        Self {
            start: start_t,
            end: end_t.max(start_t),
        }
    }

    /// Parses `"HH:MM:SS - HH:MM:SS"`.
    pub fn parse(s: &str) -> AppResult<Self> {
        let caps = PERIOD_RE
            .captures(s)
            .ok_or_else(|| AppError::InvalidPeriod(s.to_string()))?;

        let start = NaiveTime::parse_from_str(&caps[1], TIME_FMT)
            .map_err(|_| AppError::InvalidPeriod(s.to_string()))?;
        let end = NaiveTime::parse_from_str(&caps[2], TIME_FMT)
            .map_err(|_| AppError::InvalidPeriod(s.to_string()))?;

        Self::new(start, end)
    }

    pub fn start(&self) -> NaiveTime {
        self.start
    }

    pub fn end(&self) -> NaiveTime {
        self.end
    }

    pub fn seconds(&self) -> i64 {
        (self.end - self.start).num_seconds()
    }

    pub fn minutes(&self) -> f64 {
        self.seconds() as f64 / 60.0
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} - {}",
            self.start.format(TIME_FMT),
            self.end.format(TIME_FMT)
        )
    }
}

/// What a period was spent on.
#[derive(Debug, Clone, PartialEq)]
pub enum Label {
    /// Work or rest the user described at a boundary.
    Activity(String),
    /// A pause, with the reason given on resume and its measured length.
    Pause { reason: String, minutes: f64 },
}

impl Label {
    pub fn text(&self) -> &str {
        match self {
            Label::Activity(text) => text,
            Label::Pause { reason, .. } => reason,
        }
    }

    pub fn kind_str(&self) -> &'static str {
        match self {
            Label::Activity(_) => "activity",
            Label::Pause { .. } => "pause",
        }
    }

    pub fn is_pause(&self) -> bool {
        matches!(self, Label::Pause { .. })
    }

    /// Same kind of label carrying new text; a pause keeps its duration.
    pub fn with_text(&self, text: impl Into<String>) -> Label {
        match self {
            Label::Activity(_) => Label::Activity(text.into()),
            Label::Pause { minutes, .. } => Label::Pause {
                reason: text.into(),
                minutes: *minutes,
            },
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Activity(text) => f.write_str(text),
            Label::Pause { reason, minutes } if reason.is_empty() => {
                write!(f, "Pause ({minutes:.2} min)")
            }
            Label::Pause { reason, minutes } => write!(f, "Pause: {reason} ({minutes:.2} min)"),
        }
    }
}

/// One line of the day log.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub period: Period,
    pub label: Label,
}

impl Record {
    pub fn new(period: Period, label: Label) -> Self {
        Self { period, label }
    }

    pub fn activity(period: Period, text: impl Into<String>) -> Self {
        Self::new(period, Label::Activity(text.into()))
    }

    pub fn pause(period: Period, reason: impl Into<String>, minutes: f64) -> Self {
        Self::new(
            period,
            Label::Pause {
                reason: reason.into(),
                minutes,
            },
        )
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.period, self.label)
    }
}
