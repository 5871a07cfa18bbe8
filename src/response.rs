use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A plain `{"message": ...}` acknowledgment body with an explicit status code.
#[derive(Serialize, Deserialize, Debug)]
pub struct Ack {
    #[serde(skip)]
    pub status: u16,
    pub message: String,
}

impl Ack {
    pub fn ok(message: impl Into<String>) -> Self {
        Ack {
            status: StatusCode::OK.as_u16(),
            message: message.into(),
        }
    }

    pub fn created(message: impl Into<String>) -> Self {
        Ack {
            status: StatusCode::CREATED.as_u16(),
            message: message.into(),
        }
    }
}

impl IntoResponse for Ack {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::OK);
        (status, Json(self)).into_response()
    }
}

#[derive(Serialize, Deserialize, Debug)]
pub struct HealthStatus {
    pub status: String,
    pub database: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
