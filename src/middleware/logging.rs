//! Logging middleware
//!
//! Records method, path, status and latency for every request.

use std::time::Instant;
use axum::extract::Request;
use axum::middleware::Next;
use axum::response::Response;
use crate::utils::logging::log_request;

pub async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let response = next.run(request).await;

    log_request(&method, &path, response.status().as_u16(), started.elapsed().as_millis() as u64);
    response
}
