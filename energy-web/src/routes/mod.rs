pub mod cronjob;
pub mod data;

use crate::response::ApiResponse;
use axum::http::StatusCode;

/// Runs blocking upstream and file work off the async executor
async fn blocking<T, F>(f: F) -> Result<T, ApiResponse>
where
    F: FnOnce() -> common::Result<T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(result) => result.map_err(ApiResponse::from),
        Err(err) => Err(ApiResponse::error(StatusCode::INTERNAL_SERVER_ERROR, err)),
    }
}
