//! Tidings API server entry point.

use std::error::Error;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tidings_api::app;
use tidings_api::config::AppConfig;
use tidings_api::state::AppState;
use tidings_core::cancellation::CancellationToken;
use tidings_core::clock::SystemClock;
use tidings_core::repository::Repository;
use tidings_reminders::domain::reminder::Reminder;
use tidings_store::in_memory::InMemoryRepository;
use tidings_store::pg_reminder_repository::PgReminderRepository;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Tidings API server");

    let config = AppConfig::from_env()?;

    let repository: Arc<dyn Repository<Reminder>> = if let Some(database_url) = &config.database_url {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        let repository = PgReminderRepository::new(pool);
        repository.ensure_schema().await?;
        tracing::info!("persisting reminders to PostgreSQL");
        Arc::new(repository)
    } else {
        tracing::warn!("DATABASE_URL not set; reminders are kept in memory");
        Arc::new(InMemoryRepository::<Reminder>::new())
    };

    // Subscriptions are fixed from here until shutdown.
    let mediator = app::build_mediator(repository, Arc::new(SystemClock), &config.api_version)?;
    for subscription in mediator.subscriptions() {
        tracing::info!(
            event_kind = subscription.event_kind,
            consumer = %subscription.consumer_name,
            "consumer ready"
        );
    }

    let shutdown = CancellationToken::new();
    let app_state = AppState::new(Arc::new(mediator), shutdown.clone());

    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = app::router(app_state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr = config.bind_addr()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, cancelling in-progress dispatches that have not yet
/// reached their repository write.
async fn shutdown_signal(shutdown: CancellationToken) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
    shutdown.cancel();
}
