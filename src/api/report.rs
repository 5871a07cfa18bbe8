use crate::AppState;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::Json;
use crate::model::report::{NewReport, Report, ReportWithAuthor};
use crate::payloads::report::{NewReportPayload, ReportFeedbackPayload};
use crate::response::Ack;
use crate::schema::{reports::dsl as reports_dsl, users::dsl as users_dsl};
use axum::extract::{Path, State};
use axum::Extension;
use axum::http::StatusCode;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct CreateReportResponse {
    pub message: String,
    pub report_id: i32,
}

/// Stores a new lecture-session report attributed to the authenticated
/// lecturer.
///
/// Request Body: `NewReportPayload`
///
/// Returns
/// * `201 Created` with `{message, reportId}`.
/// * `500 Internal Server Error`: database failure.
#[instrument(skip(state, payload))]
pub async fn create_report(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<NewReportPayload>,
) -> Result<(StatusCode, Json<CreateReportResponse>), AppError> {
    let new_report = NewReport {
        faculty: payload.faculty,
        class_name: payload.class_name,
        week_of_reporting: payload.week_of_reporting,
        date_of_lecture: payload.date_of_lecture,
        course_name: payload.course_name,
        course_code: payload.course_code,
        lecturer_name: payload.lecturer_name,
        actual_present: payload.actual_present,
        total_registered: payload.total_registered,
        venue: payload.venue,
        scheduled_time: payload.scheduled_time,
        topic_taught: payload.topic_taught,
        learning_outcomes: payload.learning_outcomes,
        recommendations: payload.recommendations,
        created_by: Some(user.id),
    };

    let report_id = super::helper::run_query(&state.pool, move |conn| {
        diesel::insert_into(reports_dsl::reports)
            .values(&new_report)
            .returning(reports_dsl::id)
            .get_result::<i32>(conn)
    })
    .await?;

    info!("User {} created report {}", user.id, report_id);
    Ok((
        StatusCode::CREATED,
        Json(CreateReportResponse {
            message: "Report saved successfully".to_string(),
            report_id,
        }),
    ))
}

/// Lists the 100 most recent reports by lecture date, each with the
/// creator's username.
#[instrument(skip(state))]
pub async fn list_reports(
    State(state): State<AppState>,
) -> Result<Json<Vec<ReportWithAuthor>>, AppError> {
    let rows = super::helper::run_query(&state.pool, |conn| {
        reports_dsl::reports
            .left_join(users_dsl::users)
            .order(reports_dsl::date_of_lecture.desc())
            .limit(100)
            .select((Report::as_select(), users_dsl::username.nullable()))
            .load::<(Report, Option<String>)>(conn)
    })
    .await?;

    Ok(Json(rows.into_iter().map(ReportWithAuthor::from).collect()))
}

/// Fetches one report with its creator's username, or 404.
#[instrument(skip(state))]
pub async fn get_report(
    State(state): State<AppState>,
    Path(report_id): Path<i32>,
) -> Result<Json<ReportWithAuthor>, AppError> {
    let row = super::helper::run_query(&state.pool, move |conn| {
        reports_dsl::reports
            .left_join(users_dsl::users)
            .filter(reports_dsl::id.eq(report_id))
            .select((Report::as_select(), users_dsl::username.nullable()))
            .first::<(Report, Option<String>)>(conn)
            .optional()
    })
    .await?
    .ok_or_else(|| AppError::NotFound("Report not found".to_string()))?;

    Ok(Json(ReportWithAuthor::from(row)))
}

/// Overwrites a report's PRL feedback. Route is gated to role=prl.
///
/// Returns
/// * `200 OK` with `{message}`.
/// * `404 Not Found`: no report with that id.
#[instrument(skip(state, payload))]
pub async fn set_prl_feedback(
    State(state): State<AppState>,
    Path(report_id): Path<i32>,
    Json(payload): Json<ReportFeedbackPayload>,
) -> Result<Ack, AppError> {
    set_role_feedback(&state, report_id, payload.feedback, FeedbackColumn::Prl).await?;
    Ok(Ack::ok("PRL feedback saved successfully"))
}

/// Overwrites a report's PL feedback. Route is gated to role=pl.
#[instrument(skip(state, payload))]
pub async fn set_pl_feedback(
    State(state): State<AppState>,
    Path(report_id): Path<i32>,
    Json(payload): Json<ReportFeedbackPayload>,
) -> Result<Ack, AppError> {
    set_role_feedback(&state, report_id, payload.feedback, FeedbackColumn::Pl).await?;
    Ok(Ack::ok("PL feedback saved successfully"))
}

#[derive(Clone, Copy, Debug)]
enum FeedbackColumn {
    Prl,
    Pl,
}

async fn set_role_feedback(
    state: &AppState,
    report_id: i32,
    feedback: String,
    column: FeedbackColumn,
) -> Result<(), AppError> {
    let updated = super::helper::run_query(&state.pool, move |conn| {
        let target = reports_dsl::reports.filter(reports_dsl::id.eq(report_id));
        match column {
            FeedbackColumn::Prl => diesel::update(target)
                .set(reports_dsl::prl_feedback.eq(Some(feedback)))
                .execute(conn),
            FeedbackColumn::Pl => diesel::update(target)
                .set(reports_dsl::pl_feedback.eq(Some(feedback)))
                .execute(conn),
        }
    })
    .await?;

    if updated == 0 {
        return Err(AppError::NotFound("Report not found".to_string()));
    }
    info!("Stored {:?} feedback on report {}", column, report_id);
    Ok(())
}
