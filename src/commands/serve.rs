//! Serve command - Starts the HTTP server.

use std::sync::Arc;

use crate::api::{create_router, AppState};
use crate::cli::args::ServeArgs;
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, MemoryAccountStore};
use crate::services::{seed_demo_accounts, Services};

/// Execute the serve command
pub async fn execute(args: ServeArgs, mut config: Config) -> AppResult<()> {
    tracing::info!("Starting server...");

    if let Some(host) = args.host {
        config.server_host = host;
    }
    if let Some(port) = args.port {
        config.server_port = port;
    }

    let (services, database) = if args.in_memory {
        tracing::warn!("Using in-memory account store; accounts are lost on exit");
        let services = Services::with_repository(Arc::new(MemoryAccountStore::new()), &config);
        (services, None)
    } else {
        let db = Arc::new(Database::connect(&config).await?);
        tracing::info!("Database connected");
        let services = Services::from_connection(db.get_connection(), &config);
        (services, Some(db))
    };

    if config.seed_on_startup {
        let created = seed_demo_accounts(services.repository().as_ref()).await?;
        tracing::info!(created, "Demo accounts seeded");
    }

    let app = create_router(AppState::from_services(&services, &config, database));

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind to {}: {}", addr, e)))?;

    tracing::info!("Server running on http://{}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    Ok(())
}
