//! Health check endpoint

use axum::Json;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
    pub status: String,
}

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        message: "Expense Tracker Microservice is running!".to_string(),
        status: "Headless & API-First".to_string(),
    })
}
