//! Domain model for the Reminders context.

pub mod commands;
pub mod events;
pub mod reminder;
