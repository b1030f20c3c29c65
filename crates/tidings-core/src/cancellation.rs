//! Cooperative cancellation signal.
//!
//! Cancellation is advisory: work checks the token at its await boundaries
//! and abandons what has not started yet. Anything already in flight is left
//! to the collaborator that owns it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::DomainError;

/// A clonable flag shared between whoever may cancel and whoever does the work.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Creates a token that has not been cancelled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals cancellation to every clone of this token.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }

    /// Returns `true` once `cancel` has been called on any clone.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Returns `Err(DomainError::Cancelled)` if cancellation has been signalled.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Cancelled` when the token is cancelled.
    pub fn check(&self) -> Result<(), DomainError> {
        if self.is_cancelled() {
            Err(DomainError::Cancelled)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_token_is_not_cancelled() {
        let token = CancellationToken::new();

        assert!(!token.is_cancelled());
        assert!(token.check().is_ok());
    }

    #[test]
    fn test_cancel_is_visible_through_clones() {
        // Arrange
        let token = CancellationToken::new();
        let observer = token.clone();

        // Act
        token.cancel();

        // Assert
        assert!(observer.is_cancelled());
        assert!(matches!(observer.check(), Err(DomainError::Cancelled)));
    }
}
