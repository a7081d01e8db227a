//! Request middleware: CORS and per-request access logging.
use axum::middleware::Next;
use axum::{body::Body, http::Request, response::Response};
use std::time::Instant;
use tower_http::cors::CorsLayer;

pub fn cors() -> CorsLayer {
    CorsLayer::permissive()
}

pub async fn log_requests(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(req).await;

    tracing::debug!(
        %method,
        %path,
        status = response.status().as_u16(),
        elapsed_us = start.elapsed().as_micros() as u64,
        "request handled"
    );
    response
}
