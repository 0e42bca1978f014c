use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tracing::{debug, error, warn};

use super::{
    basic::parse_basic,
    dto::PublicUser,
    password::{verify_dummy_blocking, verify_password_blocking},
};
use crate::{error::ApiError, state::AppState};

/// Authenticated caller, resolved from `Authorization: Basic` against the user store.
///
/// Every failure cause rejects with the same [`ApiError::Unauthenticated`]; the
/// cause itself is only logged.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub PublicUser);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Some(header) = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
        else {
            warn!("auth header not found");
            return Err(ApiError::Unauthenticated);
        };

        let Some(creds) = parse_basic(header) else {
            warn!("malformed basic auth header");
            return Err(ApiError::Unauthenticated);
        };

        let email = creds.name.trim().to_lowercase();
        let user = state.store.find_user_by_email(&email).await?;

        let Some(user) = user else {
            verify_dummy_blocking(creds.secret).await;
            warn!(%email, "authentication failure: unknown user");
            return Err(ApiError::Unauthenticated);
        };

        let ok = match verify_password_blocking(creds.secret, user.password_hash.clone()).await {
            Ok(ok) => ok,
            Err(e) => {
                error!(error = %e, user_id = user.id, "stored password hash unusable");
                false
            }
        };
        if !ok {
            warn!(user_id = user.id, "authentication failure: wrong password");
            return Err(ApiError::Unauthenticated);
        }

        debug!(user_id = user.id, "authentication successful");
        Ok(CurrentUser(PublicUser::from(user)))
    }
}
