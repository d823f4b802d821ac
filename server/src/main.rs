mod config;
mod http;
mod persistence;
mod rsvp;

use config::StorageKind;
use http::HttpOptions;
use persistence::sqlite::{migrate_json_to_sqlite, Database, SqliteRsvpRepository, DATABASE_FILE};
use persistence::{RsvpRepository, RsvpStore};
use rsvp::RsvpService;
use std::net::SocketAddr;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing with span durations
    use tracing_subscriber::fmt::format::FmtSpan;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_span_events(FmtSpan::CLOSE)
        .init();

    tracing::info!("Starting RSVP server");

    let data_dir = config::get_data_dir();
    let storage = config::get_storage_kind();
    let addr = config::get_bind_addr();
    let options = HttpOptions {
        public_dir: config::get_public_dir(),
        cors: config::get_cors_enabled(),
    };

    tracing::info!("Using data directory: {}", data_dir.display());
    tracing::info!("Using public directory: {}", options.public_dir.display());
    tracing::info!(?storage, cors = options.cors, "Storage configured");

    match storage {
        StorageKind::Json => {
            let store = RsvpStore::new(&data_dir);
            tracing::info!("Using snapshot file: {}", store.path().display());
            serve(store, addr, &options).await
        }
        StorageKind::Sqlite => {
            let db = Database::open(&data_dir.join(DATABASE_FILE)).await?;
            let report = migrate_json_to_sqlite(db.pool(), &data_dir).await?;
            if !report.skipped && report.imported > 0 {
                tracing::info!(imported = report.imported, "Imported legacy JSON RSVPs");
            }
            serve(SqliteRsvpRepository::new(db.pool().clone()), addr, &options).await
        }
    }
}

async fn serve<R: RsvpRepository>(
    repo: R,
    addr: SocketAddr,
    options: &HttpOptions,
) -> anyhow::Result<()> {
    let service = Arc::new(RsvpService::new(repo));
    let app = http::router(service, options);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
