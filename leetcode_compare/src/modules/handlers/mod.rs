pub mod compare;

use axum::{extract::Extension, http::StatusCode};
use leetcode_compare_libs::{LeetCodeApi, LeetCodeClient};
use std::sync::Arc;

pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

pub async fn readiness(Extension(client): Extension<Arc<LeetCodeClient>>) -> StatusCode {
    match client.ping().await {
        Ok(_) => StatusCode::OK,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}
