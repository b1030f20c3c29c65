//! Test authorizer that refuses everyone.

use async_trait::async_trait;
use tidings_core::error::DomainError;
use tidings_core::identity::UserId;
use tidings_mediator::Authorizer;

/// An authorizer that refuses every user. Useful for testing that refused
/// requests never reach their handler.
#[derive(Debug, Clone, Copy)]
pub struct DenyAllAuthorizer;

#[async_trait]
impl Authorizer for DenyAllAuthorizer {
    async fn authorize(
        &self,
        user_id: UserId,
        request_type: &'static str,
    ) -> Result<(), DomainError> {
        Err(DomainError::Authorization(format!(
            "user {user_id} may not issue {request_type}"
        )))
    }
}
