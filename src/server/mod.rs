//! Content service: serves the article index and bodies over HTTP

mod cors;
mod routes;

pub use cors::AllowedOrigins;
pub use routes::{decode_slug, RequestError};

use anyhow::Result;
use axum::{body::Bytes, middleware, routing::get, Router};
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::content::Artifact;

/// Every path under this prefix gets CORS treatment
pub const API_PREFIX: &str = "/api/";

/// Immutable article data, built once at startup
#[derive(Debug, Clone)]
pub struct Catalog {
    /// The index, serialized once up front
    index_json: Bytes,
    bodies: HashMap<String, Bytes>,
}

impl Catalog {
    /// Build the catalog from a loaded artifact
    pub fn from_artifact(artifact: Artifact) -> Result<Self, serde_json::Error> {
        let index_json = Bytes::from(serde_json::to_vec(&artifact.index)?);
        let bodies = artifact
            .bodies
            .into_iter()
            .map(|(slug, body)| (slug, Bytes::from(body)))
            .collect();
        Ok(Self { index_json, bodies })
    }

    pub fn index_json(&self) -> &Bytes {
        &self.index_json
    }

    pub fn body(&self, slug: &str) -> Option<&Bytes> {
        self.bodies.get(slug)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }
}

/// Shared, read-only request state
#[derive(Clone)]
pub struct AppState {
    catalog: Arc<Catalog>,
    cors: Arc<AllowedOrigins>,
}

impl AppState {
    pub fn new(catalog: Catalog, cors: AllowedOrigins) -> Self {
        Self {
            catalog: Arc::new(catalog),
            cors: Arc::new(cors),
        }
    }
}

/// Build the service router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/articles",
            get(routes::list_articles).fallback(routes::not_found),
        )
        .route(
            "/api/articles/:slug",
            get(routes::get_article).fallback(routes::not_found),
        )
        .fallback(routes::not_found)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            cors::cors_middleware,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the content service and run until Ctrl+C
pub async fn start(catalog: Catalog, cors: AllowedOrigins, ip: &str, port: u16) -> Result<()> {
    tracing::info!("Serving {} articles", catalog.len());
    match &cors {
        AllowedOrigins::Any => tracing::info!("CORS: any origin"),
        AllowedOrigins::List(origins) => tracing::info!("CORS: {}", origins.join(", ")),
    }

    let app = router(AppState::new(catalog, cors));

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr = SocketAddr::new(bind_ip.parse::<IpAddr>()?, port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    println!("Content service running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Content service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
}
