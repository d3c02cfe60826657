use std::sync::Arc;

use actix_web::{middleware::NormalizePath, web, App, HttpServer};
use tracing_actix_web::TracingLogger;
use project_showcase::{
    db::postgres::{create_pool, run_migrations},
    graceful_shutdown::shutdown_signal,
    repositories::{memory::InMemoryProjectRepo, project::ProjectRepository, sqlx_repo::SqlxProjectRepo},
    routes::configure_routes,
    settings::{AppConfig, StorageBackend},
    telemetry::init_tracing,
    web::cors::build_cors,
    AppState,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = match AppConfig::new() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(&config);
    tracing::info!("Loaded configuration: {:?}", config);

    let project_repo: Arc<dyn ProjectRepository> = match config.storage {
        StorageBackend::Postgres => {
            let pool = match create_pool(&config).await {
                Ok(pool) => pool,
                Err(e) => {
                    tracing::error!("Failed to create database connection pool: {}", e);
                    std::process::exit(1);
                }
            };

            if let Err(e) = run_migrations(&pool).await {
                tracing::error!("{:#}", e);
                std::process::exit(1);
            }

            Arc::new(SqlxProjectRepo::new(pool))
        }
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory storage; projects will not survive a restart");
            Arc::new(InMemoryProjectRepo::new())
        }
    };

    let app_state = web::Data::new(AppState::new(project_repo.clone()));
    let cors_origins = config.cors_origins();
    let server_addr = config.server_addr();

    tracing::info!(
        "🚀 Starting {} v{} on {}",
        config.name,
        env!("CARGO_PKG_VERSION"),
        server_addr
    );

    let server = HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(NormalizePath::trim())
            .wrap(build_cors(&cors_origins))
            .wrap(TracingLogger::default())
            .configure(configure_routes)
    })
    .workers(config.worker_count)
    .disable_signals()
    .bind(server_addr)?
    .run();

    let handle = server.handle();

    tokio::select! {
        res = server => res?,
        _ = shutdown_signal() => {
            handle.stop(true).await;
        }
    }

    project_repo.close().await;
    tracing::info!("Server stopped, storage connections closed.");

    Ok(())
}
