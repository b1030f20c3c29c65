//! Commands for the Reminders context.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tidings_core::identity::UserId;
use tidings_core::request::{Authorizeable, Request, RequestIdentity};
use uuid::Uuid;

/// Command to schedule a reminder on behalf of a user.
#[derive(Debug, Clone)]
pub struct SetReminder {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The user the reminder is for.
    pub user_id: UserId,
    /// Identifier to give the new reminder.
    pub reminder_id: Uuid,
    /// What to be reminded of.
    pub title: String,
    /// When the reminder becomes due.
    pub remind_at: DateTime<Utc>,
}

/// Result of a successfully handled `SetReminder`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SetReminderOutcome {
    /// The scheduled reminder.
    pub reminder_id: Uuid,
    /// The `ReminderSet` event that was published.
    pub event_id: Uuid,
}

impl Request for SetReminder {
    type Response = SetReminderOutcome;

    fn request_type(&self) -> &'static str {
        "reminders.set_reminder"
    }

    fn identity(&self) -> RequestIdentity {
        RequestIdentity::of(self)
    }
}

impl Authorizeable for SetReminder {
    fn user_id(&self) -> UserId {
        self.user_id
    }
}
