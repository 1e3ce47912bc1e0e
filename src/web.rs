//! HTTP API over the published snapshot
//!
//! Every snapshot route answers with a `SERVER_NOT_STARTED` error until the
//! first build has been published.

use axum::{
    extract::{Path, Request, State},
    http::{HeaderValue, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::error::{PoolError, Result};
use crate::models::{Card, Decklist, ExceptionGroup, LegalityTable};
use crate::store::SnapshotStore;

/// Error body sent to clients
#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    msg: String,
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Failure of a snapshot route
#[derive(Debug)]
enum ApiError {
    NotStarted,
    CardNotFound(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, msg, kind) = match self {
            ApiError::NotStarted => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Server has not finished started up.".to_string(),
                "SERVER_NOT_STARTED",
            ),
            ApiError::CardNotFound(name) => (
                StatusCode::NOT_FOUND,
                format!("Card is not in the legal pool: {}", name),
                "CARD_NOT_FOUND",
            ),
        };
        (
            status,
            Json(ErrorBody {
                error: ErrorDetail { msg, kind },
            }),
        )
            .into_response()
    }
}

impl From<PoolError> for ApiError {
    fn from(err: PoolError) -> Self {
        // The store only ever fails with NotReady
        log::debug!("Snapshot unavailable: {}", err);
        ApiError::NotStarted
    }
}

type ApiResult<T> = std::result::Result<Json<T>, ApiError>;

/// GET /ping
async fn ping_handler() -> &'static str {
    "pong"
}

/// GET /fllist
async fn fllist_handler(State(store): State<SnapshotStore>) -> ApiResult<LegalityTable> {
    let snapshot = store.current().await?;
    Ok(Json(snapshot.legality_table.clone()))
}

/// GET /decklists
async fn decklists_handler(State(store): State<SnapshotStore>) -> ApiResult<Vec<Decklist>> {
    let snapshot = store.current().await?;
    Ok(Json(snapshot.decklists.clone()))
}

/// GET /addlist
async fn addlist_handler(State(store): State<SnapshotStore>) -> ApiResult<Vec<ExceptionGroup>> {
    let snapshot = store.current().await?;
    Ok(Json(snapshot.exception_groups.clone()))
}

/// GET /cards/{name}
async fn card_handler(
    State(store): State<SnapshotStore>,
    Path(name): Path<String>,
) -> ApiResult<Arc<Card>> {
    let snapshot = store.current().await?;
    snapshot
        .card(&name)
        .cloned()
        .map(Json)
        .ok_or(ApiError::CardNotFound(name))
}

/// Access log line per request
async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    log::info!(
        "{} {} {} - {:.1} ms",
        method,
        uri,
        response.status().as_u16(),
        started.elapsed().as_secs_f64() * 1000.0
    );
    response
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring invalid CORS origin '{}': {}", origin, e);
                None
            }
        })
        .collect();
    CorsLayer::new().allow_origin(AllowOrigin::list(origins))
}

/// Build the web server router
pub fn create_router(store: SnapshotStore, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/ping", get(ping_handler))
        .route("/fllist", get(fllist_handler))
        .route("/decklists", get(decklists_handler))
        .route("/addlist", get(addlist_handler))
        .route("/cards/{name}", get(card_handler))
        .layer(cors_layer(allowed_origins))
        .layer(middleware::from_fn(log_request))
        .with_state(store)
}

/// Serve the API until Ctrl-C
pub async fn serve(store: SnapshotStore, port: u16, allowed_origins: &[String]) -> Result<()> {
    let app = create_router(store, allowed_origins);
    let addr = format!("0.0.0.0:{}", port);

    log::info!("Server is listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}

#[cfg(test)]
#[path = "web_tests.rs"]
mod tests;
