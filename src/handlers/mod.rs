//! Announcement handlers over an injected store.

pub mod announcement;
pub use announcement::*;
