//! Test repositories — mock `Repository` implementations for tests.

use std::sync::Mutex;

use async_trait::async_trait;
use tidings_core::cancellation::CancellationToken;
use tidings_core::error::DomainError;
use tidings_core::repository::{Entity, Repository};

/// A repository that records every entity passed to `add` and always
/// succeeds. Duplicates are recorded too, so tests can count deliveries.
#[derive(Debug)]
pub struct RecordingRepository<T> {
    added: Mutex<Vec<T>>,
}

impl<T> Default for RecordingRepository<T> {
    fn default() -> Self {
        Self {
            added: Mutex::new(Vec::new()),
        }
    }
}

impl<T: Clone> RecordingRepository<T> {
    /// Creates an empty recording repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of every entity that was added, in call order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn added(&self) -> Vec<T> {
        self.added.lock().unwrap().clone()
    }
}

#[async_trait]
impl<T> Repository<T> for RecordingRepository<T>
where
    T: Entity + Send + 'static,
{
    async fn add(&self, entity: T, cancellation: &CancellationToken) -> Result<(), DomainError> {
        cancellation.check()?;
        self.added.lock().unwrap().push(entity);
        Ok(())
    }
}

/// A repository whose `add` always fails with a persistence error. Useful
/// for testing error propagation.
#[derive(Debug)]
pub struct FailingRepository;

/// Message carried by every `FailingRepository` error.
pub const FAILING_REPOSITORY_MESSAGE: &str = "connection refused";

#[async_trait]
impl<T> Repository<T> for FailingRepository
where
    T: Entity + Send + 'static,
{
    async fn add(&self, _entity: T, _cancellation: &CancellationToken) -> Result<(), DomainError> {
        Err(DomainError::Persistence(FAILING_REPOSITORY_MESSAGE.into()))
    }
}
