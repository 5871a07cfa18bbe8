use crate::AppState;
use crate::response::HealthStatus;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use diesel::RunQueryDsl;
use tracing::{error, instrument};

/// Liveness probe. Reports degraded (500) when the database cannot answer
/// `SELECT 1`; the server itself keeps accepting requests either way.
#[instrument(skip(state))]
pub async fn health(State(state): State<AppState>) -> Response {
    match super::helper::run_query(&state.pool, |conn| {
        diesel::sql_query("SELECT 1").execute(conn)
    })
    .await
    {
        Ok(_) => Json(HealthStatus {
            status: "ok".to_string(),
            database: "connected".to_string(),
            timestamp: Utc::now(),
            error: None,
        })
        .into_response(),
        Err(err) => {
            error!("Health check failed: {}", err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthStatus {
                    status: "error".to_string(),
                    database: "disconnected".to_string(),
                    timestamp: Utc::now(),
                    error: Some("database unreachable".to_string()),
                }),
            )
                .into_response()
        }
    }
}
