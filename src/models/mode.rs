use serde::Serialize;
use std::fmt;

/// What the tracker is doing right now, as shown to the user.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Mode {
    Working,
    Resting,
    Paused,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Working => "working",
            Mode::Resting => "resting",
            Mode::Paused => "paused",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The timed half of the cycle. A paused session remembers which segment
/// it will return to.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum Segment {
    Work,
    Rest,
}

impl Segment {
    pub fn flipped(self) -> Self {
        match self {
            Segment::Work => Segment::Rest,
            Segment::Rest => Segment::Work,
        }
    }

    pub fn mode(self) -> Mode {
        match self {
            Segment::Work => Mode::Working,
            Segment::Rest => Mode::Resting,
        }
    }
}
