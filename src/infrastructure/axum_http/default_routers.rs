use axum::{
    http::{StatusCode, Uri},
    response::IntoResponse,
};
use tracing::{debug, info};

pub async fn not_found(uri: Uri) -> impl IntoResponse {
    info!(%uri, "router: no route matched");
    (StatusCode::NOT_FOUND, "NOT_FOUND").into_response()
}

pub async fn health_check() -> impl IntoResponse {
    debug!("router: health check");
    (StatusCode::OK, "OK").into_response()
}
