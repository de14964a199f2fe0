//! Authentication
//!
//! Resolves `Authorization: Bearer <token>` against the users table. Handlers that
//! take a [`CurrentUser`] argument are authenticated; the resolved id is then
//! passed explicitly into every core call.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};
use tracing::debug;

use crate::api::state::AppState;
use crate::core::user;
use crate::errors::{Error, Result};

/// The authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// User id, used as `owner_id` in core calls
    pub id: i64,
    /// Login name, for logging
    pub username: String,
}

/// Pulls the token out of an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    let value = headers
        .get(AUTHORIZATION)
        .ok_or_else(|| Error::unauthenticated("Missing Authorization header"))?
        .to_str()
        .map_err(|_| Error::unauthenticated("Malformed Authorization header"))?;

    // The scheme name is case-insensitive (RFC 7235).
    let token = value
        .split_once(' ')
        .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("Bearer"))
        .map(|(_, token)| token.trim())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::unauthenticated("Expected Authorization: Bearer <token>"))?;

    Ok(token)
}

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self> {
        let token = bearer_token(&parts.headers)?;
        let found = user::find_by_token(&state.db, token)
            .await?
            .ok_or_else(|| Error::unauthenticated("Invalid bearer token"))?;

        debug!(user_id = found.id, "Authenticated request");
        Ok(Self {
            id: found.id,
            username: found.username,
        })
    }
}
