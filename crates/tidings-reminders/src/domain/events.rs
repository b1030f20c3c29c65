//! Domain events for the Reminders context.

use serde::{Deserialize, Serialize};
use tidings_core::clock::Clock;
use tidings_core::event::{DomainEvent, EventMetadata};
use tidings_mediator::Notification;
use uuid::Uuid;

use super::reminder::Reminder;

/// Event type name of [`ReminderSet`].
pub const REMINDER_SET: &str = "reminders.reminder_set";

/// Emitted when a reminder becomes active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderSet {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// The reminder to persist.
    pub reminder: Reminder,
}

impl ReminderSet {
    /// Creates the event for a freshly scheduled reminder.
    #[must_use]
    pub fn new(reminder: Reminder, correlation_id: Uuid, clock: &dyn Clock) -> Self {
        Self {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: REMINDER_SET.to_owned(),
                aggregate_id: reminder.reminder_id,
                correlation_id,
                causation_id: correlation_id,
                occurred_at: clock.now(),
            },
            reminder,
        }
    }
}

impl Notification for ReminderSet {
    fn kind() -> &'static str {
        REMINDER_SET
    }
}

impl DomainEvent for ReminderSet {
    fn event_type(&self) -> &'static str {
        REMINDER_SET
    }

    fn to_payload(&self) -> serde_json::Value {
        // Reminder has string keys and no fallible fields, so this cannot fail.
        serde_json::to_value(&self.reminder).expect("Reminder serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
