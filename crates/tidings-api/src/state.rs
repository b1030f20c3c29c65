//! Shared application state.

use std::sync::Arc;

use tidings_core::cancellation::CancellationToken;
use tidings_mediator::Mediator;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Dispatcher built once at startup.
    pub mediator: Arc<Mediator>,
    /// Process-wide cancellation, fired on shutdown.
    pub shutdown: CancellationToken,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(mediator: Arc<Mediator>, shutdown: CancellationToken) -> Self {
        Self { mediator, shutdown }
    }
}
