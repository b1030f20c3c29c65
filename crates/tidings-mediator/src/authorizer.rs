//! Authorization policy consulted for identified requests.

use async_trait::async_trait;
use tidings_core::error::DomainError;
use tidings_core::identity::UserId;

/// Decides whether a user may issue a given request type.
///
/// Only called for requests presenting a non-empty identity; the empty
/// identity is rejected before any policy runs.
#[async_trait]
pub trait Authorizer: Send + Sync {
    /// Returns `Ok(())` if `user_id` may issue `request_type`.
    async fn authorize(&self, user_id: UserId, request_type: &'static str)
    -> Result<(), DomainError>;
}

/// Accepts every authenticated (non-nil) user.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthenticatedUserAuthorizer;

#[async_trait]
impl Authorizer for AuthenticatedUserAuthorizer {
    async fn authorize(
        &self,
        user_id: UserId,
        request_type: &'static str,
    ) -> Result<(), DomainError> {
        if user_id.is_nil() {
            return Err(DomainError::Authorization(format!(
                "{request_type} requires an authenticated user"
            )));
        }
        Ok(())
    }
}
