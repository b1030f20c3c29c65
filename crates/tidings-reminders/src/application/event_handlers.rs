//! Event handlers for the Reminders context.
//!
//! Each handler performs exactly one repository write per delivery and
//! surfaces repository failures unchanged. Redelivery of the same event
//! results in another write; deduplication belongs to the repository.

use std::sync::Arc;

use async_trait::async_trait;
use tidings_core::cancellation::CancellationToken;
use tidings_core::error::DomainError;
use tidings_core::repository::Repository;
use tidings_mediator::NotificationHandler;
use tracing::debug;

use crate::domain::events::ReminderSet;
use crate::domain::reminder::Reminder;

/// Persists the reminder carried by every `ReminderSet` event.
#[derive(Clone)]
pub struct ReminderSetHandler {
    repository: Arc<dyn Repository<Reminder>>,
}

impl ReminderSetHandler {
    /// Creates a handler writing through `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn Repository<Reminder>>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl NotificationHandler<ReminderSet> for ReminderSetHandler {
    async fn handle(
        &self,
        event: &ReminderSet,
        cancellation: &CancellationToken,
    ) -> Result<(), DomainError> {
        cancellation.check()?;
        debug!(
            event_id = %event.metadata.event_id,
            reminder_id = %event.reminder.reminder_id,
            "persisting reminder"
        );
        self.repository
            .add(event.reminder.clone(), cancellation)
            .await
    }
}
