use axum::body::Body;
use axum::extract::FromRef;
use axum::http::{header, Method, StatusCode};
use axum::response::Response;
use axum::routing::get;
use axum::Router;
use prometheus::{Encoder, TextEncoder};
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::configuration::ApplicationSettings;

use super::error::ApiError;
use super::routes::{category_router, questions_router, quiz_router};

#[derive(FromRef, Clone)]
pub struct AppState {
    pool: SqlitePool,
}

/// Assemble the application router. Tests drive this directly.
pub fn app_router(pool: SqlitePool) -> Router {
    let state = AppState { pool };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_methods([
            Method::GET,
            Method::PUT,
            Method::POST,
            Method::DELETE,
            Method::OPTIONS,
        ]);

    Router::new()
        .route("/metrics", get(metrics))
        .merge(category_router(state.clone()))
        .merge(questions_router(state.clone()))
        .merge(quiz_router(state))
        .fallback(|| async { ApiError::NotFound })
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

pub async fn run_server(settings: &ApplicationSettings, pool: SqlitePool) -> anyhow::Result<()> {
    let addr = settings.address();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Serving on {addr}");
    axum::serve(listener, app_router(pool)).await?;
    Ok(())
}

async fn metrics() -> Response {
    let encoder = TextEncoder::new();
    let metrics = prometheus::gather();
    let mut buf = vec![];
    encoder.encode(&metrics, &mut buf).unwrap();
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, encoder.format_type())
        .body(Body::from(buf))
        .unwrap()
}
