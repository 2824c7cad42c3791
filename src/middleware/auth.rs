//! Admin token extractor guarding pattern management.

use axum::{
    extract::FromRequestParts,
    http::request::Parts,
};
use sha2::{Digest, Sha256};

use crate::errors::AppError;
use crate::AppState;

pub const ADMIN_TOKEN_HEADER: &str = "X-Admin-Token";

/// Extractor that requires the configured admin token.
///
/// ```ignore
/// async fn handler(_admin: RequireAdmin) -> impl IntoResponse { ... }
/// ```
#[derive(Debug, Clone)]
pub struct RequireAdmin;

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let expected = state.config.admin_token.as_deref().ok_or_else(|| {
            AppError::Forbidden("Pattern management is disabled".to_string())
        })?;

        let supplied = parts
            .headers
            .get(ADMIN_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        if !tokens_match(supplied, expected) {
            tracing::warn!("Rejected admin request with wrong token");
            return Err(AppError::Unauthorized);
        }

        Ok(RequireAdmin)
    }
}

/// Compare fixed-size digests so timing does not depend on where the tokens differ.
fn tokens_match(supplied: &str, expected: &str) -> bool {
    let supplied = Sha256::digest(supplied.as_bytes());
    let expected = Sha256::digest(expected.as_bytes());
    supplied
        .iter()
        .zip(expected.iter())
        .fold(0u8, |diff, (a, b)| diff | (a ^ b))
        == 0
}
