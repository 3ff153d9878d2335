//! Server lifecycle
//!
//! Wires settings, database, services and the availability poller together
//! and runs the HTTP server until a shutdown signal arrives.

use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tracing::{info, warn};
use crate::config::Settings;
use crate::database::{self, DatabaseService};
use crate::handlers::create_app;
use crate::services::{AvailabilityPoller, ServiceFactory};
use crate::state::AppState;
use crate::utils::errors::Result;

/// Connect, migrate and serve until Ctrl-C or SIGTERM
pub async fn run(settings: Settings) -> Result<()> {
    info!("Connecting to database...");
    let pool = database::create_pool(&settings.database).await?;
    database::run_migrations(&pool).await?;

    let services = ServiceFactory::new(&settings, DatabaseService::new(pool));

    let refresh = Duration::from_secs(settings.registration.refresh_interval_seconds);
    let poller = AvailabilityPoller::spawn(services.availability_service.clone(), refresh).await;
    if let Some(report) = poller.latest().report() {
        info!(
            total_slots = report.total_slots,
            slots_available = report.slots_available,
            status = ?report.status,
            "Initial availability computed"
        );
    } else {
        warn!("Initial availability unknown");
    }

    let address = settings.bind_address();
    let state = AppState::new(settings, services, poller.subscribe());
    let app = create_app(state);

    let listener = TcpListener::bind(&address).await?;
    info!(address = %address, "Pereirinha API listening");

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    poller.shutdown().await;
    info!("Pereirinha API has been shut down");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
