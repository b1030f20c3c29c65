//! The mediator and its startup builder.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tidings_consumer::ConsumerName;
use tidings_core::cancellation::CancellationToken;
use tidings_core::error::DomainError;
use tidings_core::request::{Request, require_identity};
use tracing::{debug, info, instrument, warn};

use crate::authorizer::{AuthenticatedUserAuthorizer, Authorizer};
use crate::handler::{DispatchContext, Notification, NotificationHandler, RequestHandler};

/// Holds an `Arc<dyn RequestHandler<R>>` for the `R` it is keyed by.
type ErasedRequestHandler = Box<dyn Any + Send + Sync>;

#[async_trait]
trait ErasedNotificationHandler: Send + Sync {
    async fn handle(
        &self,
        event: &(dyn Any + Send + Sync),
        cancellation: &CancellationToken,
    ) -> Result<(), DomainError>;
}

struct TypedNotificationHandler<E, H> {
    handler: H,
    _event: PhantomData<fn(&E)>,
}

#[async_trait]
impl<E, H> ErasedNotificationHandler for TypedNotificationHandler<E, H>
where
    E: Notification,
    H: NotificationHandler<E>,
{
    async fn handle(
        &self,
        event: &(dyn Any + Send + Sync),
        cancellation: &CancellationToken,
    ) -> Result<(), DomainError> {
        let Some(event) = event.downcast_ref::<E>() else {
            return Err(DomainError::Configuration(format!(
                "subscriber for {} received an event of a different type",
                E::kind()
            )));
        };
        self.handler.handle(event, cancellation).await
    }
}

struct Subscription {
    consumer: ConsumerName,
    handler: Arc<dyn ErasedNotificationHandler>,
}

/// Read-only description of one registered subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubscriptionInfo {
    /// The event kind subscribed to.
    pub event_kind: &'static str,
    /// The durable consumer name the subscriber registered under.
    pub consumer_name: ConsumerName,
}

/// Collects registrations at startup and freezes them into a [`Mediator`].
pub struct MediatorBuilder {
    authorizer: Arc<dyn Authorizer>,
    request_handlers: HashMap<TypeId, ErasedRequestHandler>,
    subscriptions: HashMap<&'static str, Vec<Subscription>>,
}

impl Default for MediatorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl MediatorBuilder {
    /// Creates a builder that authorizes with [`AuthenticatedUserAuthorizer`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            authorizer: Arc::new(AuthenticatedUserAuthorizer),
            request_handlers: HashMap::new(),
            subscriptions: HashMap::new(),
        }
    }

    /// Replaces the authorization policy.
    #[must_use]
    pub fn with_authorizer(mut self, authorizer: Arc<dyn Authorizer>) -> Self {
        self.authorizer = authorizer;
        self
    }

    /// Registers the handler for request type `R`, replacing any previous one.
    #[must_use]
    pub fn register_request_handler<R, H>(mut self, handler: H) -> Self
    where
        R: Request,
        H: RequestHandler<R> + 'static,
    {
        let handler: Arc<dyn RequestHandler<R>> = Arc::new(handler);
        let request_type = std::any::type_name::<R>();
        if self
            .request_handlers
            .insert(TypeId::of::<R>(), Box::new(handler))
            .is_some()
        {
            warn!(request_type, "replaced previously registered request handler");
        } else {
            debug!(request_type, "registered request handler");
        }
        self
    }

    /// Subscribes `handler` to event kind `E` under `consumer`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Configuration` if `consumer` is already
    /// subscribed to the same event kind.
    pub fn subscribe<E, H>(mut self, consumer: ConsumerName, handler: H) -> Result<Self, DomainError>
    where
        E: Notification,
        H: NotificationHandler<E> + 'static,
    {
        let subscriptions = self.subscriptions.entry(E::kind()).or_default();
        if subscriptions.iter().any(|s| s.consumer == consumer) {
            return Err(DomainError::Configuration(format!(
                "consumer {consumer} is already subscribed to {}",
                E::kind()
            )));
        }

        info!(event_kind = E::kind(), consumer = %consumer, "subscribed consumer");
        subscriptions.push(Subscription {
            consumer,
            handler: Arc::new(TypedNotificationHandler {
                handler,
                _event: PhantomData,
            }),
        });
        Ok(self)
    }

    /// Freezes the registrations.
    #[must_use]
    pub fn build(self) -> Mediator {
        Mediator {
            authorizer: self.authorizer,
            request_handlers: self.request_handlers,
            subscriptions: self.subscriptions,
        }
    }
}

/// Routes requests to their handler and events to their subscribers.
///
/// Immutable once built; share it behind an `Arc` and drop it at shutdown.
pub struct Mediator {
    authorizer: Arc<dyn Authorizer>,
    request_handlers: HashMap<TypeId, ErasedRequestHandler>,
    subscriptions: HashMap<&'static str, Vec<Subscription>>,
}

impl std::fmt::Debug for Mediator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mediator")
            .field("request_handlers", &self.request_handlers.len())
            .field("subscriptions", &self.subscriptions())
            .finish_non_exhaustive()
    }
}

impl Mediator {
    /// Returns a builder.
    #[must_use]
    pub fn builder() -> MediatorBuilder {
        MediatorBuilder::new()
    }

    /// Dispatches `request` to its handler.
    ///
    /// Cancellation is checked first. Requests presenting an identity are
    /// then authorized; the empty identity and refused identities never
    /// reach the handler.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Cancelled` if `cancellation` already fired,
    /// `DomainError::Authorization` if authorization fails,
    /// `DomainError::HandlerNotRegistered` if no handler exists for `R`, and
    /// otherwise whatever the handler returns.
    #[instrument(skip_all, fields(request_type = request.request_type()))]
    pub async fn send<R: Request>(
        &self,
        request: R,
        cancellation: &CancellationToken,
    ) -> Result<R::Response, DomainError> {
        cancellation.check()?;
        self.authorize(&request).await?;

        let handler = self
            .request_handler::<R>()
            .ok_or(DomainError::HandlerNotRegistered(request.request_type()))?;

        debug!("dispatching request");
        let context = DispatchContext::new(self, cancellation);
        handler.handle(request, &context).await
    }

    /// Delivers `event` to every subscriber of its kind, in registration order.
    ///
    /// Publishing a kind nobody subscribes to is not an error.
    ///
    /// # Errors
    ///
    /// Stops at the first failing subscriber and returns its error unchanged.
    #[instrument(skip_all, fields(event_kind = E::kind()))]
    pub async fn publish<E: Notification>(
        &self,
        event: &E,
        cancellation: &CancellationToken,
    ) -> Result<(), DomainError> {
        let Some(subscriptions) = self.subscriptions.get(E::kind()) else {
            debug!("no subscribers for event kind");
            return Ok(());
        };

        for subscription in subscriptions {
            debug!(consumer = %subscription.consumer, "delivering event");
            if let Err(err) = subscription.handler.handle(event, cancellation).await {
                warn!(consumer = %subscription.consumer, error = %err, "subscriber failed");
                return Err(err);
            }
        }
        Ok(())
    }

    /// Lists every subscription, ordered by event kind then registration.
    #[must_use]
    pub fn subscriptions(&self) -> Vec<SubscriptionInfo> {
        let mut kinds: Vec<&'static str> = self.subscriptions.keys().copied().collect();
        kinds.sort_unstable();
        kinds
            .into_iter()
            .flat_map(|kind| {
                self.subscriptions
                    .get(kind)
                    .into_iter()
                    .flatten()
                    .map(move |subscription| SubscriptionInfo {
                        event_kind: kind,
                        consumer_name: subscription.consumer.clone(),
                    })
            })
            .collect()
    }

    fn request_handler<R: Request>(&self) -> Option<Arc<dyn RequestHandler<R>>> {
        self.request_handlers
            .get(&TypeId::of::<R>())
            .and_then(|handler| handler.downcast_ref::<Arc<dyn RequestHandler<R>>>())
            .cloned()
    }

    async fn authorize<R: Request>(&self, request: &R) -> Result<(), DomainError> {
        let user_id = match require_identity(request) {
            Ok(Some(user_id)) => user_id,
            Ok(None) => return Ok(()),
            Err(err) => {
                warn!(error = %err, "rejected request without identity");
                return Err(err);
            }
        };

        if let Err(err) = self
            .authorizer
            .authorize(user_id, request.request_type())
            .await
        {
            warn!(user_id = %user_id, error = %err, "authorization refused");
            return Err(err);
        }
        debug!(user_id = %user_id, "request authorized");
        Ok(())
    }
}
