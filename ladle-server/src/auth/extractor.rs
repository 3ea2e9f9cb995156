//! JWT Extractors
//!
//! Custom extractors for automatically validating JWT tokens on
//! customer- and vendor-facing handlers.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::{CurrentUser, CurrentVendor, JwtError, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

fn validated_claims(
    parts: &Parts,
    state: &ServerState,
) -> Result<crate::auth::Claims, AppError> {
    let auth_header = parts
        .headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => JwtService::extract_from_header(header)
            .ok_or(AppError::InvalidToken)?,
        None => {
            tracing::warn!(uri = %parts.uri, "Request without authorization header");
            return Err(AppError::Unauthorized);
        }
    };

    state.get_jwt_service().validate_token(token).map_err(|e| {
        tracing::warn!(uri = %parts.uri, error = %e, "Token validation failed");
        match e {
            JwtError::ExpiredToken => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        }
    })
}

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let claims = validated_claims(parts, state)?;
        let user = CurrentUser::try_from(claims).map_err(AppError::Forbidden)?;
        parts.extensions.insert(user.clone());
        Ok(user)
    }
}

impl FromRequestParts<ServerState> for CurrentVendor {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(vendor) = parts.extensions.get::<CurrentVendor>() {
            return Ok(vendor.clone());
        }

        let claims = validated_claims(parts, state)?;
        let vendor = CurrentVendor::try_from(claims).map_err(AppError::Forbidden)?;
        parts.extensions.insert(vendor.clone());
        Ok(vendor)
    }
}
