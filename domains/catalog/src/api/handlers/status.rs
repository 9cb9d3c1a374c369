//! Service status handler

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: &'static str,
    pub version: &'static str,
}

/// GET / - Service status
pub async fn home() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "active",
        message: "Cinedex up and running",
        version: env!("CARGO_PKG_VERSION"),
    })
}
