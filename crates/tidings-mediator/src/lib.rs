//! Tidings — request dispatch and notification routing.
//!
//! The mediator is built once at startup from explicit registrations: one
//! handler per request type, and any number of named subscriptions per event
//! kind. Requests that present a user identity are authorized before their
//! handler runs.

pub mod authorizer;
pub mod handler;
pub mod mediator;

pub use authorizer::{AuthenticatedUserAuthorizer, Authorizer};
pub use handler::{DispatchContext, Notification, NotificationHandler, RequestHandler};
pub use mediator::{Mediator, MediatorBuilder, SubscriptionInfo};
