use crate::AppState;
use crate::errors::AppError;
use crate::model::user::{Role, UserInfo};
use crate::payloads::user::ListUsersParams;
use crate::schema::users::dsl as users_dsl;
use axum::Json;
use axum::extract::{Query, State};
use diesel::prelude::*;
use std::str::FromStr;
use tracing::instrument;

/// Lists users alphabetically, optionally filtered by role. The password
/// hash column is never selected.
///
/// Query Parameters:
/// * role (optional): one of student, lecturer, pl, prl; anything else is 400.
#[instrument(skip(state))]
pub async fn list_users(
    State(state): State<AppState>,
    Query(params): Query<ListUsersParams>,
) -> Result<Json<Vec<UserInfo>>, AppError> {
    let role_filter = params
        .role
        .map(|value| {
            Role::from_str(&value).map_err(|_| AppError::BadRequest("Invalid role".to_string()))
        })
        .transpose()?;

    let rows = super::helper::run_query(&state.pool, move |conn| {
        let mut query = users_dsl::users
            .select((
                users_dsl::id,
                users_dsl::username,
                users_dsl::role,
                users_dsl::created_at,
            ))
            .order(users_dsl::username.asc())
            .into_boxed();

        if let Some(role) = role_filter {
            query = query.filter(users_dsl::role.eq(role.as_str()));
        }

        query.load::<UserInfo>(conn)
    })
    .await?;

    Ok(Json(rows))
}
