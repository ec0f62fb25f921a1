use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitalwatch_api::config::ServerConfig;
use vitalwatch_api::router::build_app_router;
use vitalwatch_api::state::AppState;
use vitalwatch_core::notification::NotificationChannel;
use vitalwatch_core::store::memory::{MemoryAlertStore, MemoryReadingStore};
use vitalwatch_core::store::{AlertStore, ReadingStore};
use vitalwatch_db::{PgAlertStore, PgReadingStore, TableName};
use vitalwatch_events::{EmailConfig, NotificationTarget};
use vitalwatch_pipeline::{BatchCoordinator, PipelineConfig};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "vitalwatch_api=debug,vitalwatch_pipeline=debug,vitalwatch_events=debug,tower_http=debug"
            .into()
    });
    let registry = tracing_subscriber::registry().with(filter);
    if std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json")) {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    let pipeline = PipelineConfig::from_env().expect("Invalid pipeline configuration");
    tracing::info!(
        readings = %pipeline.reading_store_name,
        alerts = %pipeline.alert_store_name,
        destination = %pipeline.notification_destination,
        concurrency = pipeline.record_concurrency,
        "Loaded pipeline configuration"
    );

    let guaranteed = config.guaranteed_batch_size(
        pipeline.record_time_bound(),
        pipeline.record_concurrency,
    );
    if guaranteed == 0 {
        tracing::warn!(
            request_timeout = ?config.request_timeout(),
            record_time_bound = ?pipeline.record_time_bound(),
            "REQUEST_TIMEOUT_SECS is shorter than one record's store and notify timeouts"
        );
    } else {
        tracing::info!(
            guaranteed,
            request_timeout = ?config.request_timeout(),
            "Batches up to this many records finish within the request timeout"
        );
    }

    // --- Stores ---
    let (pool, readings, alerts) = build_stores(&pipeline).await;

    // --- Notification channel ---
    let channel = build_channel(&pipeline);
    tracing::info!(destination = %channel.destination(), "Notification channel ready");

    // --- App state ---
    let coordinator = BatchCoordinator::new(readings, alerts, channel, &pipeline);
    let state = AppState {
        coordinator: Arc::new(coordinator),
        pool,
        config: Arc::new(config.clone()),
    };

    let app = build_app_router(state);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// PostgreSQL stores when `DATABASE_URL` is set, in-memory stores otherwise.
async fn build_stores(
    pipeline: &PipelineConfig,
) -> (
    Option<vitalwatch_db::DbPool>,
    Arc<dyn ReadingStore>,
    Arc<dyn AlertStore>,
) {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        tracing::warn!("DATABASE_URL not set, readings and alerts are kept in memory only");
        return (
            None,
            Arc::new(MemoryReadingStore::new(pipeline.reading_store_name.as_str())),
            Arc::new(MemoryAlertStore::new(pipeline.alert_store_name.as_str())),
        );
    };

    let reading_table =
        TableName::parse(&pipeline.reading_store_name).expect("Invalid READING_STORE_NAME");
    let alert_table =
        TableName::parse(&pipeline.alert_store_name).expect("Invalid ALERT_STORE_NAME");

    let pool = vitalwatch_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    vitalwatch_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    vitalwatch_db::ensure_schema(&pool, &reading_table, &alert_table)
        .await
        .expect("Failed to create reading/alert tables");

    (
        Some(pool.clone()),
        Arc::new(PgReadingStore::new(pool.clone(), reading_table)),
        Arc::new(PgAlertStore::new(pool, alert_table)),
    )
}

/// Build the channel for `NOTIFICATION_DESTINATION`.
///
/// Panics at startup on an unusable destination so misconfiguration fails
/// fast instead of on the first critical reading.
fn build_channel(pipeline: &PipelineConfig) -> Arc<dyn NotificationChannel> {
    let target = NotificationTarget::parse(&pipeline.notification_destination)
        .unwrap_or_else(|e| panic!("Invalid NOTIFICATION_DESTINATION: {e}"));
    let email = EmailConfig::from_env();
    target
        .build_channel(email.as_ref())
        .unwrap_or_else(|e| panic!("Failed to build notification channel: {e}"))
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix). In-flight batches
/// finish before the server exits.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
