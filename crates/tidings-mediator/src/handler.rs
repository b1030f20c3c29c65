//! Handler traits and the context handed to request handlers.

use async_trait::async_trait;
use tidings_core::cancellation::CancellationToken;
use tidings_core::error::DomainError;
use tidings_core::request::Request;

use crate::mediator::Mediator;

/// An event kind that can be published through the mediator.
pub trait Notification: Send + Sync + std::fmt::Debug + 'static {
    /// Identifier subscriptions are keyed by, e.g. `reminders.reminder_set`.
    fn kind() -> &'static str;
}

/// Handles one request type.
#[async_trait]
pub trait RequestHandler<R: Request>: Send + Sync {
    /// Handles `request`, which has already passed authorization.
    async fn handle(
        &self,
        request: R,
        context: &DispatchContext<'_>,
    ) -> Result<R::Response, DomainError>;
}

/// Reacts to one event kind.
///
/// Handlers may be invoked concurrently for distinct events and may see the
/// same event more than once; they must not keep mutable state between calls.
#[async_trait]
pub trait NotificationHandler<E: Notification>: Send + Sync {
    /// Handles a delivered event.
    async fn handle(&self, event: &E, cancellation: &CancellationToken)
    -> Result<(), DomainError>;
}

/// Per-dispatch view of the mediator given to request handlers.
#[derive(Debug, Clone, Copy)]
pub struct DispatchContext<'a> {
    mediator: &'a Mediator,
    cancellation: &'a CancellationToken,
}

impl<'a> DispatchContext<'a> {
    pub(crate) fn new(mediator: &'a Mediator, cancellation: &'a CancellationToken) -> Self {
        Self {
            mediator,
            cancellation,
        }
    }

    /// The cancellation signal for this dispatch.
    #[must_use]
    pub fn cancellation(&self) -> &CancellationToken {
        self.cancellation
    }

    /// Publishes `event` to its subscribers under this dispatch's cancellation.
    ///
    /// # Errors
    ///
    /// Returns the first subscriber error unchanged.
    pub async fn publish<E: Notification>(&self, event: &E) -> Result<(), DomainError> {
        self.mediator.publish(event, self.cancellation).await
    }
}
