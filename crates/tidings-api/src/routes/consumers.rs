//! Consumer introspection: which durable consumers are subscribed to what.

use axum::extract::State;
use axum::{Json, Router, routing::get};
use tidings_mediator::SubscriptionInfo;

use crate::state::AppState;

/// GET /
async fn list_consumers(State(state): State<AppState>) -> Json<Vec<SubscriptionInfo>> {
    Json(state.mediator.subscriptions())
}

/// Returns the router for consumer introspection.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_consumers))
}
