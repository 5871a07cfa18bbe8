use crate::AppState;
use crate::errors::AppError;
use crate::extract::Json;
use crate::model::course::{CourseWithLecturer, NewCourse};
use crate::payloads::course::CoursePayload;
use crate::response::Ack;
use crate::schema::{courses::dsl as courses_dsl, users::dsl as users_dsl};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use diesel::prelude::*;
use tracing::{info, instrument};

/// Creates a course. Route is gated to role=pl (program leaders manage the
/// course catalogue).
///
/// Request Body: `CoursePayload`
///
/// Returns
/// * `201 Created` with the new row joined with the lecturer's username.
/// * `400 Bad Request`: lecturerId does not reference a user.
/// * `409 Conflict`: course code already taken.
#[instrument(skip(state, payload))]
pub async fn create_course(
    State(state): State<AppState>,
    Json(payload): Json<CoursePayload>,
) -> Result<(StatusCode, Json<CourseWithLecturer>), AppError> {
    if payload.name.trim().is_empty() || payload.code.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Course name and code are required".to_string(),
        ));
    }

    let new_course = NewCourse {
        name: payload.name,
        code: payload.code,
        lecturer_id: payload.lecturer_id,
    };

    let course = super::helper::run_query(&state.pool, move |conn| {
        let course_id = diesel::insert_into(courses_dsl::courses)
            .values(&new_course)
            .returning(courses_dsl::id)
            .get_result::<i32>(conn)?;

        courses_dsl::courses
            .left_join(users_dsl::users)
            .filter(courses_dsl::id.eq(course_id))
            .select((
                courses_dsl::id,
                courses_dsl::name,
                courses_dsl::code,
                courses_dsl::lecturer_id,
                courses_dsl::created_at,
                users_dsl::username.nullable(),
            ))
            .first::<CourseWithLecturer>(conn)
    })
    .await
    .map_err(|err| match err {
        AppError::Conflict(_) => AppError::Conflict("Course code already exists".to_string()),
        other => other,
    })?;

    info!("Created course {} ({})", course.id, course.code);
    Ok((StatusCode::CREATED, Json(course)))
}

/// Lists all courses alphabetically with the assigned lecturer's username.
#[instrument(skip(state))]
pub async fn list_courses(
    State(state): State<AppState>,
) -> Result<Json<Vec<CourseWithLecturer>>, AppError> {
    let rows = super::helper::run_query(&state.pool, |conn| {
        courses_dsl::courses
            .left_join(users_dsl::users)
            .order(courses_dsl::name.asc())
            .select((
                courses_dsl::id,
                courses_dsl::name,
                courses_dsl::code,
                courses_dsl::lecturer_id,
                courses_dsl::created_at,
                users_dsl::username.nullable(),
            ))
            .load::<CourseWithLecturer>(conn)
    })
    .await?;

    Ok(Json(rows))
}

/// Updates a course's name, code and lecturer assignment. Gated to role=pl.
///
/// Returns
/// * `200 OK` with `{message}`.
/// * `404 Not Found`: no course with that id.
/// * `409 Conflict`: the new code collides with another course.
#[instrument(skip(state, payload))]
pub async fn update_course(
    State(state): State<AppState>,
    Path(course_id): Path<i32>,
    Json(payload): Json<CoursePayload>,
) -> Result<Ack, AppError> {
    let updated = super::helper::run_query(&state.pool, move |conn| {
        diesel::update(courses_dsl::courses.filter(courses_dsl::id.eq(course_id)))
            .set((
                courses_dsl::name.eq(payload.name),
                courses_dsl::code.eq(payload.code),
                courses_dsl::lecturer_id.eq(payload.lecturer_id),
            ))
            .execute(conn)
    })
    .await
    .map_err(|err| match err {
        AppError::Conflict(_) => AppError::Conflict("Course code already exists".to_string()),
        other => other,
    })?;

    if updated == 0 {
        return Err(AppError::NotFound("Course not found".to_string()));
    }
    info!("Updated course {}", course_id);
    Ok(Ack::ok("Course updated successfully"))
}

/// Deletes a course by id. Gated to role=pl.
#[instrument(skip(state))]
pub async fn delete_course(
    State(state): State<AppState>,
    Path(course_id): Path<i32>,
) -> Result<Ack, AppError> {
    let deleted = super::helper::run_query(&state.pool, move |conn| {
        diesel::delete(courses_dsl::courses.filter(courses_dsl::id.eq(course_id))).execute(conn)
    })
    .await?;

    if deleted == 0 {
        return Err(AppError::NotFound("Course not found".to_string()));
    }
    info!("Deleted course {}", course_id);
    Ok(Ack::ok("Course deleted successfully"))
}
