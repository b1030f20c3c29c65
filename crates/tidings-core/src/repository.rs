//! Repository abstraction.

use async_trait::async_trait;
use uuid::Uuid;

use crate::cancellation::CancellationToken;
use crate::error::DomainError;

/// A domain entity with a stable identifier.
pub trait Entity: Send + Sync {
    /// Returns the entity identifier.
    fn entity_id(&self) -> Uuid;
}

/// Append-only write access to a collection of entities.
///
/// Implementations check `cancellation` before issuing the write. Once the
/// write is in flight, cancellation behaviour is theirs to define.
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// Adds a fully constructed entity.
    async fn add(&self, entity: T, cancellation: &CancellationToken) -> Result<(), DomainError>;
}
