use crate::AppState;
use crate::errors::AppError;
use crate::model::user::Role;
use argon2::Argon2;
use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use axum::Extension;
use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Hashes a plaintext password with argon2 and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| {
            AppError::InternalServerError(anyhow::anyhow!("Password hashing failed: {}", err))
        })
}

/// Verifies a plaintext password against a stored argon2 hash. A malformed
/// stored hash counts as a failed verification.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        warn!("Stored password hash could not be parsed");
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Claims embedded in a session token.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Claims {
    /// User id.
    pub sub: i32,
    pub username: String,
    pub role: Role,
    /// Expiry as a unix timestamp.
    pub exp: i64,
}

/// Signing material and token lifetime, created once at startup and carried
/// in the application state.
#[derive(Clone)]
pub struct TokenConfig {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenConfig {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        TokenConfig {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::hours(ttl_hours),
        }
    }

    /// Issues a signed token for the given user, expiring after the
    /// configured lifetime.
    pub fn issue(&self, user_id: i32, username: &str, role: Role) -> Result<String, AppError> {
        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            role,
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding).map_err(|err| {
            AppError::InternalServerError(anyhow::anyhow!("Token signing failed: {}", err))
        })
    }

    /// Verifies the signature and expiry of a token, returning its claims.
    /// Expiry is enforced exactly, without the default clock-skew leeway.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let mut validation = Validation::default();
        validation.leeway = 0;
        decode::<Claims>(token, &self.decoding, &validation).map(|data| data.claims)
    }
}

/// Verified caller identity, attached to the request extensions by
/// [`require_auth`] and read by handlers and role guards.
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: i32,
    pub username: String,
    pub role: Role,
}

/// Bearer-token guard applied to every protected route group.
///
/// * missing/unusable `Authorization` header: 401
/// * bad signature or expired token: 403
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("Access token required".to_string()))?;

    let claims = state.tokens.verify(token).map_err(|err| {
        debug!("Token verification failed: {}", err);
        AppError::Forbidden("Invalid or expired token".to_string())
    })?;

    request.extensions_mut().insert(AuthUser {
        id: claims.sub,
        username: claims.username,
        role: claims.role,
    });

    Ok(next.run(request).await)
}

/// Role guard for endpoints restricted to a single role. Layered after
/// [`require_auth`], which supplies the [`AuthUser`] extension.
pub async fn require_role(
    required: Role,
    Extension(user): Extension<AuthUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    if user.role != required {
        warn!(
            "User {} (role {}) denied access to a {}-only endpoint",
            user.id, user.role, required
        );
        return Err(AppError::Forbidden(format!(
            "Only {} can perform this action",
            required
        )));
    }
    Ok(next.run(request).await)
}

/// PRL-only gate, for use with `axum::middleware::from_fn`.
pub async fn require_prl(
    user: Extension<AuthUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_role(Role::Prl, user, request, next).await
}

/// PL-only gate, for use with `axum::middleware::from_fn`.
pub async fn require_pl(
    user: Extension<AuthUser>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    require_role(Role::Pl, user, request, next).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_verifies_against_own_hash() {
        let hash = hash_password("hunter2").unwrap();
        assert_ne!(hash, "hunter2");
        assert!(verify_password("hunter2", &hash));
    }

    #[test]
    fn wrong_password_fails_verification() {
        let hash = hash_password("hunter2").unwrap();
        assert!(!verify_password("hunter3", &hash));
        assert!(!verify_password("", &hash));
    }

    #[test]
    fn garbage_stored_hash_fails_verification() {
        assert!(!verify_password("hunter2", "not-a-phc-string"));
    }

    #[test]
    fn token_round_trips_claims() {
        let config = TokenConfig::new("test-secret", 24);
        let token = config.issue(7, "alice", Role::Lecturer).unwrap();
        let claims = config.verify(&token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, Role::Lecturer);
        assert!(claims.exp > Utc::now().timestamp());
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = TokenConfig::new("test-secret", -1);
        let token = config.issue(7, "alice", Role::Student).unwrap();
        assert!(config.verify(&token).is_err());
    }

    #[test]
    fn token_just_past_expiry_is_rejected() {
        // 30s is inside jsonwebtoken's default 60s leeway; expiry must
        // still be enforced exactly.
        let config = TokenConfig::new("test-secret", 24);
        let claims = Claims {
            sub: 7,
            username: "alice".to_string(),
            role: Role::Student,
            exp: (Utc::now() - Duration::seconds(30)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();
        assert!(config.verify(&token).is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = TokenConfig::new("secret-a", 24);
        let verifier = TokenConfig::new("secret-b", 24);
        let token = issuer.issue(7, "alice", Role::Prl).unwrap();
        assert!(verifier.verify(&token).is_err());
    }
}
