//! Adapter implementations for task lifecycle ports.

pub mod memory;

mod clock;
mod countdown;

pub use clock::ManualClock;
pub use countdown::CountdownTicker;
