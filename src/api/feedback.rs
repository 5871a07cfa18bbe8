use crate::AppState;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::Json;
use crate::model::feedback::{FeedbackWithStudent, NewFeedback};
use crate::payloads::feedback::FeedbackPayload;
use crate::response::Ack;
use crate::schema::{feedback::dsl as feedback_dsl, users::dsl as users_dsl};
use axum::Extension;
use axum::extract::{Path, State};
use diesel::prelude::*;
use diesel::upsert::excluded;
use tracing::{info, instrument};

/// Stores or replaces the caller's feedback on a report, with the same
/// single-statement upsert guarantee as ratings.
///
/// Request Body: `FeedbackPayload`
///
/// Returns
/// * `201 Created` with `{message}`.
/// * `400 Bad Request`: blank feedback text or unknown report id.
#[instrument(skip(state, payload))]
pub async fn submit_feedback(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<FeedbackPayload>,
) -> Result<Ack, AppError> {
    if payload.feedback.trim().is_empty() {
        return Err(AppError::BadRequest("Feedback is required".to_string()));
    }

    let new_feedback = NewFeedback {
        report_id: payload.report_id,
        student_id: Some(user.id),
        feedback: payload.feedback,
        topic: payload.topic,
    };

    super::helper::run_query(&state.pool, move |conn| {
        diesel::insert_into(feedback_dsl::feedback)
            .values(&new_feedback)
            .on_conflict((feedback_dsl::report_id, feedback_dsl::student_id))
            .do_update()
            .set((
                feedback_dsl::feedback_text.eq(excluded(feedback_dsl::feedback_text)),
                feedback_dsl::topic.eq(excluded(feedback_dsl::topic)),
            ))
            .execute(conn)
    })
    .await
    .map_err(|err| match err {
        AppError::BadRequest(_) => AppError::BadRequest("Report not found".to_string()),
        other => other,
    })?;

    info!(
        "User {} left feedback on report {}",
        user.id, payload.report_id
    );
    Ok(Ack::created("Feedback saved successfully"))
}

/// Lists all feedback on one report with the submitting student's username.
/// Rows whose student was deleted (FK SET NULL) are omitted by the join.
#[instrument(skip(state))]
pub async fn list_report_feedback(
    State(state): State<AppState>,
    Path(report_id): Path<i32>,
) -> Result<Json<Vec<FeedbackWithStudent>>, AppError> {
    let rows = super::helper::run_query(&state.pool, move |conn| {
        feedback_dsl::feedback
            .inner_join(users_dsl::users)
            .filter(feedback_dsl::report_id.eq(report_id))
            .select((
                feedback_dsl::id,
                feedback_dsl::report_id,
                feedback_dsl::student_id,
                feedback_dsl::feedback_text,
                feedback_dsl::topic,
                feedback_dsl::created_at,
                users_dsl::username,
            ))
            .load::<FeedbackWithStudent>(conn)
    })
    .await?;

    Ok(Json(rows))
}
