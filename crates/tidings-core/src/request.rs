//! Request abstractions and the authorizeable-request capability.
//!
//! Whether a request carries a user identity is a capability of the request
//! value, checked explicitly through [`Request::identity`]. Deciding whether
//! that identity may proceed is the dispatcher's job, not the handler's.

use crate::error::DomainError;
use crate::identity::UserId;

/// Identity a request presents to the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestIdentity {
    /// The request acts on behalf of this user and must be authorized.
    Identified(UserId),
    /// The request does not take part in identity-based authorization.
    Anonymous,
}

impl RequestIdentity {
    /// The identity of an authorizeable request: always `Identified`, even
    /// when the user id is empty.
    #[must_use]
    pub fn of<R: Authorizeable + ?Sized>(request: &R) -> Self {
        Self::Identified(request.user_id())
    }
}

/// Trait that every dispatched request implements.
pub trait Request: Send + Sync + std::fmt::Debug + 'static {
    /// The value a successful handler produces.
    type Response: Send;

    /// The type name for this request (for logging/routing).
    fn request_type(&self) -> &'static str;

    /// The identity this request presents.
    ///
    /// Required: [`Authorizeable`] requests return
    /// [`RequestIdentity::of`]`(self)`, everything else returns
    /// [`RequestIdentity::Anonymous`].
    fn identity(&self) -> RequestIdentity;
}

/// Capability of requests that act on behalf of a user.
pub trait Authorizeable: Request {
    /// The user this request acts for.
    fn user_id(&self) -> UserId;
}

/// Explicit capability check run before a request reaches its handler.
///
/// Returns the user identifier for identified requests and `None` for
/// anonymous ones.
///
/// # Errors
///
/// Returns `DomainError::Authorization` when the request claims an identity
/// but carries the empty identifier.
pub fn require_identity<R: Request + ?Sized>(request: &R) -> Result<Option<UserId>, DomainError> {
    match request.identity() {
        RequestIdentity::Anonymous => Ok(None),
        RequestIdentity::Identified(user_id) if user_id.is_nil() => {
            Err(DomainError::Authorization(format!(
                "{} carries no user identity",
                request.request_type()
            )))
        }
        RequestIdentity::Identified(user_id) => Ok(Some(user_id)),
    }
}
