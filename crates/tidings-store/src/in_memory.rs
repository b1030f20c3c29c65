//! In-memory implementation of the `Repository` trait.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use tidings_core::cancellation::CancellationToken;
use tidings_core::error::DomainError;
use tidings_core::repository::{Entity, Repository};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug)]
struct Stored<T> {
    ids: HashSet<Uuid>,
    entities: Vec<T>,
}

/// Process-local, add-only repository.
#[derive(Debug)]
pub struct InMemoryRepository<T> {
    stored: Mutex<Stored<T>>,
}

impl<T> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self {
            stored: Mutex::new(Stored {
                ids: HashSet::new(),
                entities: Vec::new(),
            }),
        }
    }
}

impl<T: Clone> InMemoryRepository<T> {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored entities in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Persistence` if the internal lock is poisoned.
    pub fn snapshot(&self) -> Result<Vec<T>, DomainError> {
        let stored = self.stored.lock().map_err(poisoned)?;
        Ok(stored.entities.clone())
    }

    /// Returns the number of stored entities.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Persistence` if the internal lock is poisoned.
    pub fn len(&self) -> Result<usize, DomainError> {
        let stored = self.stored.lock().map_err(poisoned)?;
        Ok(stored.entities.len())
    }
}

#[async_trait]
impl<T> Repository<T> for InMemoryRepository<T>
where
    T: Entity + Send + 'static,
{
    async fn add(&self, entity: T, cancellation: &CancellationToken) -> Result<(), DomainError> {
        cancellation.check()?;

        let id = entity.entity_id();
        let mut stored = self.stored.lock().map_err(poisoned)?;
        if stored.ids.insert(id) {
            stored.entities.push(entity);
        } else {
            debug!(entity_id = %id, "entity already stored, ignoring duplicate add");
        }
        Ok(())
    }
}

fn poisoned<E>(_: E) -> DomainError {
    DomainError::Persistence("in-memory repository lock poisoned".into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Note {
        id: Uuid,
        text: &'static str,
    }

    impl Entity for Note {
        fn entity_id(&self) -> Uuid {
            self.id
        }
    }

    #[tokio::test]
    async fn test_add_stores_entities_in_insertion_order() {
        // Arrange
        let repo = InMemoryRepository::<Note>::new();
        let first = Note {
            id: Uuid::new_v4(),
            text: "first",
        };
        let second = Note {
            id: Uuid::new_v4(),
            text: "second",
        };
        let cancellation = CancellationToken::new();

        // Act
        repo.add(first.clone(), &cancellation).await.unwrap();
        repo.add(second.clone(), &cancellation).await.unwrap();

        // Assert
        assert_eq!(repo.snapshot().unwrap(), vec![first, second]);
    }

    #[tokio::test]
    async fn test_add_ignores_duplicate_identifier() {
        // Arrange
        let repo = InMemoryRepository::<Note>::new();
        let id = Uuid::new_v4();
        let cancellation = CancellationToken::new();

        // Act
        repo.add(Note { id, text: "original" }, &cancellation)
            .await
            .unwrap();
        let result = repo.add(Note { id, text: "redelivered" }, &cancellation).await;

        // Assert
        assert!(result.is_ok());
        assert_eq!(repo.len().unwrap(), 1);
        assert_eq!(repo.snapshot().unwrap()[0].text, "original");
    }

    #[tokio::test]
    async fn test_add_after_cancellation_stores_nothing() {
        let repo = InMemoryRepository::<Note>::new();
        let cancellation = CancellationToken::new();
        cancellation.cancel();

        let result = repo
            .add(
                Note {
                    id: Uuid::new_v4(),
                    text: "late",
                },
                &cancellation,
            )
            .await;

        assert!(matches!(result, Err(DomainError::Cancelled)));
        assert_eq!(repo.len().unwrap(), 0);
    }
}
