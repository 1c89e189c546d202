use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use batohi_api::background::import_runs::ImportTracker;
use batohi_api::background::run_retention;
use batohi_api::config::ServerConfig;
use batohi_api::router::build_app_router;
use batohi_api::state::AppState;
use batohi_db::PgRecordStore;
use batohi_pipeline::ImportPipeline;

/// How often shutdown checks whether background imports have drained.
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(250);

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "batohi_api=debug,batohi_pipeline=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(
        host = %config.host,
        port = %config.port,
        import_batch_size = config.import_batch_size.get(),
        max_upload_bytes = config.max_upload_bytes,
        run_retention_secs = config.run_retention_secs,
        "Loaded server configuration"
    );

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = batohi_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    batohi_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    batohi_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Import pipeline ---
    let store = Arc::new(PgRecordStore::new(pool.clone()));
    let pipeline = ImportPipeline::new(store).with_batch_size(config.import_batch_size);
    let imports = Arc::new(ImportTracker::new());

    let retention_cancel = tokio_util::sync::CancellationToken::new();
    let retention_handle = tokio::spawn(run_retention::run(
        Arc::clone(&imports),
        Duration::from_secs(config.run_retention_secs),
        run_retention::SWEEP_INTERVAL,
        retention_cancel.clone(),
    ));
    tracing::info!("Import run retention job spawned");

    // --- Event bus ---
    let event_bus = Arc::new(batohi_events::EventBus::default());
    tracing::info!("Event bus created");

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        pipeline,
        imports: Arc::clone(&imports),
        event_bus,
    };

    let app = build_app_router(state, &config);

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

    // --- Post-shutdown cleanup ---
    tracing::info!("Server stopped accepting connections, cleaning up");

    let drain = async {
        while imports.active_count() > 0 {
            tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
        }
    };
    let timeout = Duration::from_secs(config.shutdown_timeout_secs);
    if tokio::time::timeout(timeout, drain).await.is_err() {
        tracing::warn!(
            active_imports = imports.active_count(),
            "Shutdown timeout reached with imports still running"
        );
    } else {
        tracing::info!("Background imports drained");
    }

    retention_cancel.cancel();
    if let Err(e) = retention_handle.await {
        tracing::error!(error = %e, "Import run retention job panicked");
    }

    tracing::info!("Graceful shutdown complete");
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
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
