//! Authentication middleware
//!
//! Admin routers attach [`require_admin`] via `route_layer`; public
//! routes never pass through it. The middleware validates the bearer
//! token and injects [`CurrentUser`] into request extensions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::auth::{CurrentUser, JwtError, JwtService};
use crate::core::ServerState;
use crate::utils::AppError;

/// Require a valid admin bearer token.
///
/// | Failure | Status |
/// |---------|--------|
/// | Missing Authorization header | 401 |
/// | Expired token | 401 |
/// | Invalid token | 401 |
/// | Valid token, non-admin role | 403 |
pub async fn require_admin(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // CORS preflight carries no credentials
    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    let auth_header = req
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => {
            JwtService::extract_from_header(header).ok_or(AppError::InvalidToken)?
        }
        None => {
            tracing::warn!(uri = %req.uri(), "admin request without credentials");
            return Err(AppError::Unauthorized);
        }
    };

    match state.jwt_service.validate_token(token) {
        Ok(claims) => {
            let user = CurrentUser::from(claims);
            if !user.is_admin() {
                tracing::warn!(user = %user.username, uri = %req.uri(), "non-admin access attempt");
                return Err(AppError::Forbidden("admin role required".into()));
            }
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        Err(JwtError::ExpiredToken) => Err(AppError::TokenExpired),
        Err(e) => {
            tracing::warn!(error = %e, uri = %req.uri(), "token validation failed");
            Err(AppError::InvalidToken)
        }
    }
}
