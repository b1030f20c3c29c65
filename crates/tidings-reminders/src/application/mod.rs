//! Application layer for the Reminders context: handlers and registration.

pub mod command_handlers;
pub mod consumers;
pub mod event_handlers;
