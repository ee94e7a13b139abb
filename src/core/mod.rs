//! The tracking core: clock seam, tick scheduler, record store and the
//! session state machine that ties them together.

pub mod clock;
pub mod events;
pub mod scheduler;
pub mod session;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use events::{Continuation, Prompt, PromptKind, PromptResponse, SessionEvent};
pub use scheduler::Scheduler;
pub use session::{Intervals, Session};
pub use store::DayLog;
