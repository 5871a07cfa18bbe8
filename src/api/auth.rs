use crate::AppState;
use crate::auth;
use crate::errors::AppError;
use crate::extract::Json;
use crate::model::user::{LoginResponse, NewUser, RegisterResponse, Role, UserCredentials};
use crate::payloads::auth::{LoginPayload, RegisterPayload};
use crate::schema::users::dsl as users_dsl;
use axum::extract::State;
use axum::http::StatusCode;
use diesel::prelude::*;
use std::str::FromStr;
use tracing::{info, instrument, warn};

/// Creates a new account.
///
/// Request Body: `RegisterPayload`
///
/// Returns
/// * `201 Created` with `{message, userId}` on success.
/// * `400 Bad Request`: blank username/password or a role outside
///   {student, lecturer, pl, prl}.
/// * `409 Conflict`: the username is already taken.
/// * `500 Internal Server Error`: hashing or database failure.
#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::BadRequest(
            "All fields are required".to_string(),
        ));
    }
    let role = Role::from_str(&payload.role)
        .map_err(|_| AppError::BadRequest("Invalid role".to_string()))?;

    let new_user = NewUser {
        username: payload.username,
        password: auth::hash_password(&payload.password)?,
        role: role.to_string(),
    };

    let user_id = super::helper::run_query(&state.pool, move |conn| {
        diesel::insert_into(users_dsl::users)
            .values(&new_user)
            .returning(users_dsl::id)
            .get_result::<i32>(conn)
    })
    .await
    .map_err(|err| match err {
        AppError::Conflict(_) => AppError::Conflict("Username already exists".to_string()),
        other => other,
    })?;

    info!("Registered user {} with role {}", user_id, role);
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user_id,
        }),
    ))
}

/// Verifies credentials and issues a signed session token.
///
/// The 401 body is identical for an unknown username and a wrong password,
/// so the endpoint cannot be used to enumerate accounts.
///
/// Request Body: `LoginPayload`
///
/// Returns
/// * `200 OK` with `{message, token, role, userId, username}`.
/// * `400 Bad Request`: blank username or password.
/// * `401 Unauthorized`: credentials did not verify.
#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<LoginResponse>, AppError> {
    if payload.username.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::BadRequest(
            "Username and password are required".to_string(),
        ));
    }

    let username = payload.username.clone();
    let credentials = super::helper::run_query(&state.pool, move |conn| {
        users_dsl::users
            .filter(users_dsl::username.eq(&username))
            .select((
                users_dsl::id,
                users_dsl::username,
                users_dsl::password,
                users_dsl::role,
            ))
            .first::<UserCredentials>(conn)
            .optional()
    })
    .await?;

    let invalid = || AppError::Unauthorized("Invalid username or password".to_string());

    let Some(credentials) = credentials else {
        return Err(invalid());
    };
    if !auth::verify_password(&payload.password, &credentials.password) {
        warn!("Failed login attempt for user {}", credentials.id);
        return Err(invalid());
    }

    let role = Role::from_str(&credentials.role).map_err(|_| {
        AppError::InternalServerError(anyhow::anyhow!(
            "User {} has an unrecognized role in storage",
            credentials.id
        ))
    })?;

    let token = state
        .tokens
        .issue(credentials.id, &credentials.username, role)?;

    info!("User {} logged in", credentials.id);
    Ok(Json(LoginResponse {
        message: "Login successful".to_string(),
        token,
        role,
        user_id: credentials.id,
        username: credentials.username,
    }))
}
