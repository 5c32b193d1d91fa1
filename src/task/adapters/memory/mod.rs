//! In-memory adapters for every task port.

mod calendar;
mod capture;
mod notification;
mod task;

pub use calendar::StaticCalendarSource;
pub use capture::InMemoryImageCapture;
pub use notification::InMemoryNotificationScheduler;
pub use task::InMemoryTaskRepository;
