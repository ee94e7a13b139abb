pub mod day_key;
pub mod mode;
pub mod record;

pub use day_key::DayKey;
pub use mode::{Mode, Segment};
pub use record::{Label, Period, Record};
