//! Startup wiring shared by the binary and the integration tests.

use std::sync::Arc;

use axum::Router;
use tidings_core::clock::Clock;
use tidings_core::error::DomainError;
use tidings_core::repository::Repository;
use tidings_mediator::Mediator;
use tidings_reminders::application::consumers;
use tidings_reminders::domain::reminder::Reminder;

use crate::routes;
use crate::state::AppState;

/// Registers every bounded context with a fresh mediator.
///
/// # Errors
///
/// Returns `DomainError::Configuration` if a consumer name cannot be
/// resolved for `api_version`.
pub fn build_mediator(
    repository: Arc<dyn Repository<Reminder>>,
    clock: Arc<dyn Clock>,
    api_version: &str,
) -> Result<Mediator, DomainError> {
    let builder = consumers::register(Mediator::builder(), repository, clock, api_version)?;
    Ok(builder.build())
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/reminders", routes::reminders::router())
        .nest("/api/v1/consumers", routes::consumers::router())
        .with_state(state)
}
