use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::Json,
};
use serde_json::{json, Value};

use crate::auth::{self, password, Claims};
use crate::database::manager::DatabaseError;
use crate::error::ApiError;
use crate::middleware::validate::field_text;
use crate::AppState;

/// POST /create/user - register a new account and issue a token.
///
/// Email uniqueness is checked before insert; the unique constraint on
/// the users table backs it up against races.
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let username = field_text(&payload, "username")
        .ok_or_else(|| ApiError::bad_request("Username, email and password are required"))?;
    let email = field_text(&payload, "email")
        .ok_or_else(|| ApiError::bad_request("Username, email and password are required"))?;
    let password = field_text(&payload, "password")
        .ok_or_else(|| ApiError::bad_request("Username, email and password are required"))?;

    if !email.contains('@') {
        return Err(ApiError::bad_request("Invalid email format"));
    }
    if password.len() < 8 {
        return Err(ApiError::bad_request("Password must be at least 8 characters"));
    }

    if state.users.find_by_email(email).await?.is_some() {
        return Err(ApiError::bad_request("Email already in use"));
    }

    let password_hash = password::hash_password(password, state.security.bcrypt_cost)?;

    // The lookup above can lose a race; the unique constraint on
    // users.email is the backstop, and losing to it is still a 400.
    let user = match state.users.insert(username, email, &password_hash).await {
        Ok(user) => user,
        Err(DatabaseError::Sqlx(sqlx::Error::Database(db))) if db.is_unique_violation() => {
            return Err(ApiError::bad_request("Email already in use"));
        }
        Err(err) => return Err(err.into()),
    };

    let claims = Claims::new(user.id, user.email.clone(), state.security.token_expiry_secs);
    let token = auth::generate_token(&state.security.jwt_secret, &claims)?;

    tracing::info!("registered user {}", user.id);
    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User created successfully", "token": token })),
    ))
}

/// POST /login - verify credentials and issue a token.
///
/// Unknown email and wrong password return the same message so the
/// response never reveals which field was wrong.
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, ApiError> {
    let email = field_text(&payload, "email")
        .ok_or_else(|| ApiError::bad_request("Email and password are required"))?;
    let password = field_text(&payload, "password")
        .ok_or_else(|| ApiError::bad_request("Email and password are required"))?;

    let user = state
        .users
        .find_by_email(email)
        .await?
        .ok_or_else(|| ApiError::bad_request("Invalid email or password"))?;

    if !password::verify_password(password, &user.password_hash) {
        return Err(ApiError::bad_request("Invalid email or password"));
    }

    let claims = Claims::new(user.id, user.email.clone(), state.security.token_expiry_secs);
    let token = auth::generate_token(&state.security.jwt_secret, &claims)?;

    tracing::info!("user {} logged in", user.id);
    Ok(Json(json!({ "message": "Login successful", "token": token })))
}

/// GET /validate-token - stateless check of the bearer credential.
///
/// A missing or malformed Authorization header is handled here rather
/// than faulting; every failure mode is 401 with isValid false.
pub async fn validate_token(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> (StatusCode, Json<Value>) {
    let valid = auth::extract_bearer(&headers)
        .and_then(|token| auth::validate_token(&state.security.jwt_secret, &token))
        .is_some();

    if valid {
        (StatusCode::OK, Json(json!({ "isValid": true })))
    } else {
        (StatusCode::UNAUTHORIZED, Json(json!({ "isValid": false })))
    }
}

/// POST /logout - stateless; the server holds no session to invalidate.
pub async fn logout() -> Json<Value> {
    Json(json!({ "message": "Logged out successfully" }))
}
