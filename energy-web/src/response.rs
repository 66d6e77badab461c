use axum::http::header::CONTENT_TYPE;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use common::Error;
use serde::Serialize;
use std::fmt::Display;
use tracing::{error, warn};

/// Serializes as `{"data": ...}` or `{"error": "..."}`
#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
enum Envelope<T> {
    Data(T),
    Error(String),
}

/// Pretty-printed JSON response in the `data`/`error` envelope
#[derive(Debug)]
pub struct ApiResponse {
    status: StatusCode,
    body: String,
}

impl ApiResponse {
    pub fn data<T: Serialize>(data: T) -> Self {
        match serde_json::to_string_pretty(&Envelope::Data(data)) {
            Ok(body) => Self {
                status: StatusCode::OK,
                body,
            },
            Err(err) => Self::error(StatusCode::INTERNAL_SERVER_ERROR, err),
        }
    }

    pub fn error(status: StatusCode, message: impl Display) -> Self {
        let message = message.to_string();
        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            warn!(%status, %message, "Request rejected");
        }
        let body = serde_json::to_string_pretty(&Envelope::<()>::Error(message))
            .unwrap_or_else(|_| String::from("{\"error\": \"Internal error\"}"));
        Self { status, body }
    }

    pub fn not_found() -> Self {
        Self::error(StatusCode::NOT_FOUND, Error::EmptyDataset)
    }
}

impl From<Error> for ApiResponse {
    fn from(err: Error) -> Self {
        let status = match err {
            Error::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Error::EmptyDataset => StatusCode::NOT_FOUND,
            Error::Fetch(_)
            | Error::Configuration(_)
            | Error::CacheCorruption { .. }
            | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::error(status, err)
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (self.status, [(CONTENT_TYPE, "application/json")], self.body).into_response()
    }
}
