use axum::{
    routing::{delete, get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

mod config;
mod handlers;
mod models;
mod storage;

use config::Config;
use storage::gateway::S3Gateway;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<S3Gateway>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    tracing::info!("Starting S3 Gateway Service...");

    let config = Config::from_env()?;
    config.validate()?;

    let gateway = S3Gateway::new(&config.s3);
    tracing::info!("S3 client initialized for region {}", config.s3.region);

    let state = AppState {
        gateway: Arc::new(gateway),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health_check))
        .route(
            "/s3/bucket/create/:bucket_name",
            post(handlers::bucket::create_bucket),
        )
        .route("/s3/bucket/list", get(handlers::bucket::list_buckets))
        .route(
            "/s3/bucket/files/:bucket_name",
            get(handlers::bucket::list_files),
        )
        .route(
            "/s3/bucket/delete/hard/:bucket_name",
            delete(handlers::bucket::hard_delete_bucket),
        )
        .route(
            "/s3/bucket/delete/:bucket_name",
            delete(handlers::bucket::soft_delete_bucket),
        )
        .route(
            "/s3/file/upload/:bucket_name",
            post(handlers::file::upload_file),
        )
        .route(
            "/s3/file/delete/:bucket_name/:file_name",
            delete(handlers::file::delete_file),
        )
        .route(
            "/s3/file/download/:bucket_name/:file_name",
            get(handlers::file::download_file),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    tracing::info!("S3 Gateway Service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health_check() -> &'static str {
    "S3 Gateway Service is healthy"
}
