//! Task domain module.
//!
//! Tasks are recurring or one-off actions under a goal, with a quantity, a
//! frequency, optional reminders and a completion state.
//!
//! # Module Structure
//!
//! - `model`: `Task`, `NewTask`, `Frequency`, `CustomReminder`

mod model;

pub use model::{CustomReminder, Frequency, NewTask, Task, TaskCompletion, weekday_label};
