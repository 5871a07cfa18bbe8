use crate::AppState;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::extract::Json;
use crate::model::rating::{NewRating, RatingWithContext};
use crate::payloads::rating::RatingPayload;
use crate::response::Ack;
use crate::schema::{
    ratings::dsl as ratings_dsl, reports::dsl as reports_dsl, users::dsl as users_dsl,
};
use axum::Extension;
use axum::extract::State;
use diesel::prelude::*;
use diesel::upsert::excluded;
use tracing::{info, instrument};

/// Stores or replaces the caller's rating of a report.
///
/// A student gets at most one rating per report: the insert carries
/// `ON CONFLICT (report_id, student_id) DO UPDATE`, so concurrent
/// submissions cannot produce duplicate rows and the last write wins.
///
/// Request Body: `RatingPayload`
///
/// Returns
/// * `201 Created` with `{message}`.
/// * `400 Bad Request`: rating outside [1, 5] or unknown report id.
#[instrument(skip(state, payload))]
pub async fn submit_rating(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<RatingPayload>,
) -> Result<Ack, AppError> {
    if !(1..=5).contains(&payload.rating) {
        return Err(AppError::BadRequest(
            "Rating must be between 1 and 5".to_string(),
        ));
    }

    let new_rating = NewRating {
        report_id: payload.report_id,
        student_id: user.id,
        rating: payload.rating,
        feedback: payload.feedback,
    };

    super::helper::run_query(&state.pool, move |conn| {
        diesel::insert_into(ratings_dsl::ratings)
            .values(&new_rating)
            .on_conflict((ratings_dsl::report_id, ratings_dsl::student_id))
            .do_update()
            .set((
                ratings_dsl::rating.eq(excluded(ratings_dsl::rating)),
                ratings_dsl::feedback.eq(excluded(ratings_dsl::feedback)),
            ))
            .execute(conn)
    })
    .await
    .map_err(|err| match err {
        AppError::BadRequest(_) => AppError::BadRequest("Report not found".to_string()),
        other => other,
    })?;

    info!(
        "User {} rated report {} with {}",
        user.id, payload.report_id, payload.rating
    );
    Ok(Ack::created("Rating saved successfully"))
}

/// Lists all ratings, newest first, with the rating student's username and
/// the rated report's course name.
#[instrument(skip(state))]
pub async fn list_ratings(
    State(state): State<AppState>,
) -> Result<Json<Vec<RatingWithContext>>, AppError> {
    let rows = super::helper::run_query(&state.pool, |conn| {
        ratings_dsl::ratings
            .inner_join(users_dsl::users)
            .inner_join(reports_dsl::reports)
            .order(ratings_dsl::created_at.desc())
            .select((
                ratings_dsl::id,
                ratings_dsl::report_id,
                ratings_dsl::student_id,
                ratings_dsl::rating,
                ratings_dsl::feedback,
                users_dsl::username,
                reports_dsl::course_name,
            ))
            .load::<RatingWithContext>(conn)
    })
    .await?;

    Ok(Json(rows))
}
