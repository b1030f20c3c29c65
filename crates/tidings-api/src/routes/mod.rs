//! Route modules.

pub mod consumers;
pub mod health;
pub mod reminders;
