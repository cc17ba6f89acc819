//! Pure domain logic shared by the database and API layers.
//!
//! No I/O lives here: status/progress roll-ups, D-day formatting, the
//! legacy/numeric priority bridge, and input validation are all plain
//! functions so they can be unit-tested without a database.

pub mod dday;
pub mod error;
pub mod labels;
pub mod priority;
pub mod progress;
pub mod roles;
pub mod status;
pub mod types;
