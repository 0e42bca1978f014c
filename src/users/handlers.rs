use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tracing::{info, instrument, warn};

use super::dto::SignupRequest;
use crate::{
    auth::{password::hash_password_blocking, CurrentUser, PublicUser},
    error::{ApiError, ApiResult},
    state::AppState,
    store::NewUser,
    validation::Validator,
};

pub fn user_routes() -> Router<AppState> {
    Router::new().route("/users", get(current_user).post(signup))
}

/// Returns the caller's own public profile, straight from the authenticator.
#[instrument(skip_all)]
pub async fn current_user(CurrentUser(user): CurrentUser) -> Json<PublicUser> {
    Json(user)
}

#[instrument(skip(state, payload))]
pub async fn signup(
    State(state): State<AppState>,
    payload: Result<Json<SignupRequest>, JsonRejection>,
) -> ApiResult<impl IntoResponse> {
    let Json(payload) = payload?;

    let mut v = Validator::new();
    let first_name = v.required("firstName", payload.first_name.as_deref());
    let last_name = v.required("lastName", payload.last_name.as_deref());
    let email = v.email("emailAddress", payload.email_address.as_deref());
    v.non_empty("password", payload.password.as_deref());
    v.finish()?;

    let first_name = first_name.unwrap_or_default().to_string();
    let last_name = last_name.unwrap_or_default().to_string();
    let email = email.unwrap_or_default().to_lowercase();
    // The password is hashed verbatim, untrimmed.
    let password = payload.password.unwrap_or_default();

    // Ensure email is not taken
    if state.store.find_user_by_email(&email).await?.is_some() {
        warn!(%email, "email already registered");
        return Err(ApiError::Conflict(
            "The email address is already in use.".into(),
        ));
    }

    let password_hash = hash_password_blocking(password).await?;

    let user = state
        .store
        .create_user(NewUser {
            first_name,
            last_name,
            email_address: email,
            password_hash,
        })
        .await?;

    info!(user_id = user.id, "user created");
    Ok((StatusCode::CREATED, [(header::LOCATION, "/")]))
}
