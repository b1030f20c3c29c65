//! Routes for the Reminders bounded context.

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::{Json, Router, routing::post};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tidings_core::error::DomainError;
use tidings_core::identity::UserId;
use tidings_reminders::domain::commands::{SetReminder, SetReminderOutcome};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Header carrying the caller's user identifier.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Request body for POST /.
#[derive(Debug, Deserialize)]
pub struct SetReminderRequest {
    /// What to be reminded of.
    pub title: String,
    /// When the reminder becomes due.
    pub remind_at: DateTime<Utc>,
}

/// Reads the caller's identity. An absent header yields the empty identity,
/// which the mediator refuses; a malformed one is a client error.
fn user_id_from(headers: &HeaderMap) -> Result<UserId, ApiError> {
    let Some(value) = headers.get(USER_ID_HEADER) else {
        return Ok(UserId::nil());
    };
    value
        .to_str()
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .ok_or_else(|| {
            ApiError(DomainError::Validation(format!(
                "{USER_ID_HEADER} header must be a UUID"
            )))
        })
}

/// POST /
#[instrument(skip_all)]
async fn set_reminder(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SetReminderRequest>,
) -> Result<(StatusCode, Json<SetReminderOutcome>), ApiError> {
    let command = SetReminder {
        correlation_id: Uuid::new_v4(),
        user_id: user_id_from(&headers)?,
        reminder_id: Uuid::new_v4(),
        title: request.title,
        remind_at: request.remind_at,
    };

    info!(correlation_id = %command.correlation_id, "handling set_reminder command");

    let outcome = state.mediator.send(command, &state.shutdown).await?;

    Ok((StatusCode::CREATED, Json(outcome)))
}

/// Returns the router for the reminders context.
pub fn router() -> Router<AppState> {
    Router::new().route("/", post(set_reminder))
}
