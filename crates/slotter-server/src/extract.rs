//! Request extractors for authenticated and admin users.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::header;
use axum::http::request::Parts;
use slotter_core::error::SlotterError;
use slotter_core::models::user::User;
use surrealdb::Connection;

use crate::error::ApiError;
use crate::state::AppState;

fn bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| {
            ApiError(SlotterError::AuthenticationFailed {
                reason: "missing bearer token".into(),
            })
        })
}

/// An authenticated, active user resolved from the bearer token.
///
/// The user is re-fetched per request, so deactivation takes effect
/// immediately rather than at token expiry.
pub struct AuthUser(pub User);

impl<C: Connection> FromRequestParts<AppState<C>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<C>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)?;
        let user = state.auth.current_user(token).await?;
        Ok(Self(user))
    }
}

impl<C: Connection> OptionalFromRequestParts<AppState<C>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<C>,
    ) -> Result<Option<Self>, Self::Rejection> {
        if parts.headers.get(header::AUTHORIZATION).is_none() {
            return Ok(None);
        }
        <Self as FromRequestParts<AppState<C>>>::from_request_parts(parts, state)
            .await
            .map(Some)
    }
}

/// An authenticated platform admin.
pub struct AdminUser(pub User);

impl<C: Connection> FromRequestParts<AppState<C>> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState<C>,
    ) -> Result<Self, Self::Rejection> {
        let AuthUser(user) =
            <AuthUser as FromRequestParts<AppState<C>>>::from_request_parts(parts, state).await?;
        if !user.is_admin {
            return Err(ApiError(SlotterError::Forbidden {
                reason: "admin privileges required".into(),
            }));
        }
        Ok(Self(user))
    }
}
