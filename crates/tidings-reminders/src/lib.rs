//! Tidings — Reminders bounded context.
//!
//! Responsible for scheduling reminders on behalf of a user and persisting
//! them when the `ReminderSet` event fires.

pub mod application;
pub mod domain;
