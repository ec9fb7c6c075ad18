//! Tick scheduling: the event-loop side of round timing.
//!
//! - `Clock`: monotonic time source (`SystemClock`, `ManualClock`)
//! - `TickScheduler`: turns elapsed time into engine ticks, one per second

pub mod clock;
pub mod scheduler;

pub use clock::{Clock, ManualClock, SystemClock};
pub use scheduler::{TickScheduler, TICK_INTERVAL};
