//! Consumer declaration and mediator registration for the Reminders context.

use std::sync::Arc;

use tidings_consumer::ConsumerDeclaration;
use tidings_core::clock::Clock;
use tidings_core::error::DomainError;
use tidings_core::repository::Repository;
use tidings_mediator::MediatorBuilder;

use crate::application::command_handlers::SetReminderHandler;
use crate::application::event_handlers::ReminderSetHandler;
use crate::domain::commands::SetReminder;
use crate::domain::events::ReminderSet;
use crate::domain::reminder::Reminder;

/// Durable consumer declaration for reminder event subscribers.
pub const REMINDER_EVENT_CONTROLLER: ConsumerDeclaration = ConsumerDeclaration::new(
    "ReminderEventController",
    "[controller]_v{version:apiVersion}_[action]",
);

/// Action name of the `ReminderSet` subscription.
pub const REMINDER_SET_ACTION: &str = "ReminderSet";

/// Registers the Reminders context's request and event handlers.
///
/// # Errors
///
/// Returns `DomainError::Configuration` if the consumer name cannot be
/// resolved for `api_version` or is already subscribed.
pub fn register(
    builder: MediatorBuilder,
    repository: Arc<dyn Repository<Reminder>>,
    clock: Arc<dyn Clock>,
    api_version: &str,
) -> Result<MediatorBuilder, DomainError> {
    let consumer = REMINDER_EVENT_CONTROLLER.resolve(Some(REMINDER_SET_ACTION), Some(api_version))?;

    builder
        .register_request_handler::<SetReminder, _>(SetReminderHandler::new(clock))
        .subscribe::<ReminderSet, _>(consumer, ReminderSetHandler::new(repository))
}
