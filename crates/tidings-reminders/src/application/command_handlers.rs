//! Command handlers for the Reminders context.
//!
//! Handlers run after the mediator has authorized the request: they validate
//! input, build the domain event, and publish it.

use std::sync::Arc;

use async_trait::async_trait;
use tidings_core::clock::Clock;
use tidings_core::error::DomainError;
use tidings_mediator::{DispatchContext, RequestHandler};
use tracing::info;

use crate::domain::commands::{SetReminder, SetReminderOutcome};
use crate::domain::events::ReminderSet;
use crate::domain::reminder::Reminder;

/// Handles `SetReminder`: schedules the reminder and publishes `ReminderSet`.
#[derive(Clone)]
pub struct SetReminderHandler {
    clock: Arc<dyn Clock>,
}

impl SetReminderHandler {
    /// Creates a handler that stamps reminders with `clock`.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

#[async_trait]
impl RequestHandler<SetReminder> for SetReminderHandler {
    async fn handle(
        &self,
        command: SetReminder,
        context: &DispatchContext<'_>,
    ) -> Result<SetReminderOutcome, DomainError> {
        let reminder = Reminder::schedule(
            command.reminder_id,
            command.user_id,
            &command.title,
            command.remind_at,
            self.clock.as_ref(),
        )?;
        let event = ReminderSet::new(reminder, command.correlation_id, self.clock.as_ref());

        info!(
            correlation_id = %command.correlation_id,
            reminder_id = %event.reminder.reminder_id,
            user_id = %command.user_id,
            "reminder set"
        );
        context.publish(&event).await?;

        Ok(SetReminderOutcome {
            reminder_id: event.reminder.reminder_id,
            event_id: event.metadata.event_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{Duration, TimeZone, Utc};
    use tidings_core::cancellation::CancellationToken;
    use tidings_core::clock::Clock;
    use tidings_core::error::DomainError;
    use tidings_core::identity::UserId;
    use tidings_core::repository::Repository;
    use tidings_mediator::Mediator;
    use tidings_test_support::{
        DenyAllAuthorizer, FailingRepository, FixedClock, RecordingRepository,
    };
    use uuid::Uuid;

    use crate::application::consumers;
    use crate::domain::commands::SetReminder;
    use crate::domain::reminder::Reminder;

    fn fixed_clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
        ))
    }

    fn mediator_with(repository: Arc<dyn Repository<Reminder>>) -> Mediator {
        consumers::register(Mediator::builder(), repository, fixed_clock(), "1.0")
            .unwrap()
            .build()
    }

    fn command(user_id: UserId, title: &str) -> SetReminder {
        SetReminder {
            correlation_id: Uuid::new_v4(),
            user_id,
            reminder_id: Uuid::new_v4(),
            title: title.to_owned(),
            remind_at: Utc.with_ymd_and_hms(2026, 1, 16, 9, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_set_reminder_persists_reminder_through_event_handler() {
        // Arrange
        let repo = Arc::new(RecordingRepository::<Reminder>::new());
        let mediator = mediator_with(repo.clone());
        let user_id = UserId::new();
        let command = command(user_id, "Submit expenses");
        let reminder_id = command.reminder_id;

        // Act
        let outcome = mediator
            .send(command, &CancellationToken::new())
            .await
            .unwrap();

        // Assert
        assert_eq!(outcome.reminder_id, reminder_id);
        let added = repo.added();
        assert_eq!(added.len(), 1);
        assert_eq!(added[0].reminder_id, reminder_id);
        assert_eq!(added[0].user_id, user_id);
        assert_eq!(added[0].title, "Submit expenses");
        assert_eq!(
            added[0].created_at,
            Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
        );
    }

    #[tokio::test]
    async fn test_set_reminder_without_user_is_rejected_before_persisting() {
        // Arrange
        let repo = Arc::new(RecordingRepository::<Reminder>::new());
        let mediator = mediator_with(repo.clone());

        // Act
        let result = mediator
            .send(
                command(UserId::default(), "Submit expenses"),
                &CancellationToken::new(),
            )
            .await;

        // Assert
        assert!(matches!(result, Err(DomainError::Authorization(_))));
        assert!(repo.added().is_empty());
    }

    #[tokio::test]
    async fn test_set_reminder_refused_by_authorizer_is_not_persisted() {
        // Arrange
        let repo = Arc::new(RecordingRepository::<Reminder>::new());
        let mediator = consumers::register(
            Mediator::builder().with_authorizer(Arc::new(DenyAllAuthorizer)),
            repo.clone(),
            fixed_clock(),
            "1.0",
        )
        .unwrap()
        .build();

        // Act
        let result = mediator
            .send(command(UserId::new(), "Submit expenses"), &CancellationToken::new())
            .await;

        // Assert
        assert!(matches!(result, Err(DomainError::Authorization(_))));
        assert!(repo.added().is_empty());
    }

    #[tokio::test]
    async fn test_set_reminder_with_blank_title_returns_validation_error() {
        let repo = Arc::new(RecordingRepository::<Reminder>::new());
        let mediator = mediator_with(repo.clone());

        let result = mediator
            .send(command(UserId::new(), " "), &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(repo.added().is_empty());
    }

    #[tokio::test]
    async fn test_set_reminder_surfaces_persistence_error() {
        let mediator = mediator_with(Arc::new(FailingRepository));

        let result = mediator
            .send(command(UserId::new(), "Submit expenses"), &CancellationToken::new())
            .await;

        match result {
            Err(DomainError::Persistence(message)) => assert_eq!(message, "connection refused"),
            other => panic!("expected Persistence, got {other:?}"),
        }
    }
}
