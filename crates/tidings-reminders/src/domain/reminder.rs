//! The reminder entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tidings_core::clock::Clock;
use tidings_core::error::DomainError;
use tidings_core::identity::UserId;
use tidings_core::repository::Entity;
use uuid::Uuid;

/// Longest accepted reminder title, in characters.
pub const MAX_TITLE_CHARS: usize = 200;

/// A reminder scheduled by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    /// Reminder identifier.
    pub reminder_id: Uuid,
    /// The user who owns the reminder.
    pub user_id: UserId,
    /// What the user wants to be reminded of.
    pub title: String,
    /// When the reminder becomes due.
    pub remind_at: DateTime<Utc>,
    /// When the reminder was scheduled.
    pub created_at: DateTime<Utc>,
}

impl Reminder {
    /// Schedules a new reminder.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the title is blank or longer than
    /// [`MAX_TITLE_CHARS`], or if `remind_at` is not after `clock.now()`.
    pub fn schedule(
        reminder_id: Uuid,
        user_id: UserId,
        title: &str,
        remind_at: DateTime<Utc>,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DomainError::Validation(
                "reminder title must not be empty".into(),
            ));
        }
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(DomainError::Validation(format!(
                "reminder title must be at most {MAX_TITLE_CHARS} characters"
            )));
        }

        let now = clock.now();
        if remind_at <= now {
            return Err(DomainError::Validation(format!(
                "reminder time {remind_at} must be after {now}"
            )));
        }

        Ok(Self {
            reminder_id,
            user_id,
            title: title.to_owned(),
            remind_at,
            created_at: now,
        })
    }
}

impl Entity for Reminder {
    fn entity_id(&self) -> Uuid {
        self.reminder_id
    }
}
