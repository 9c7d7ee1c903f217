//! Caller identity middleware
//!
//! Authentication happens upstream; this service trusts the `x-user-id` /
//! `x-user-role` headers it receives and converts them into a [`Caller`]
//! extension. Requests without a well-formed identity are rejected with 401.

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::error::{AppError, ErrorCode};
use shared::models::UserRole;

/// Authenticated caller identity extracted from trusted headers
#[derive(Debug, Clone, Copy)]
pub struct Caller {
    pub user_id: i64,
    pub role: UserRole,
}

impl Caller {
    /// Require an exact role; 403 otherwise
    pub fn require(&self, role: UserRole) -> Result<(), AppError> {
        if self.role == role {
            Ok(())
        } else if role == UserRole::Admin {
            Err(AppError::new(ErrorCode::AdminRequired))
        } else {
            Err(AppError::with_message(
                ErrorCode::RoleRequired,
                format!("{} role is required", role.as_str()),
            ))
        }
    }

    /// Require one of several roles; 403 otherwise
    pub fn require_any(&self, roles: &[UserRole]) -> Result<(), AppError> {
        if roles.contains(&self.role) {
            Ok(())
        } else {
            let allowed: Vec<&str> = roles.iter().map(|r| r.as_str()).collect();
            Err(AppError::forbidden(format!(
                "one of {} roles is required",
                allowed.join(", ")
            )))
        }
    }
}

/// Middleware that converts trusted identity headers into a `Caller` extension
pub async fn caller_middleware(mut request: Request, next: Next) -> Result<Response, Response> {
    let user_id = request
        .headers()
        .get("x-user-id")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<i64>().ok())
        .ok_or_else(|| unauthenticated("Missing or malformed x-user-id header"))?;

    let role = request
        .headers()
        .get("x-user-role")
        .and_then(|v| v.to_str().ok())
        .and_then(UserRole::parse)
        .ok_or_else(|| unauthenticated("Missing or malformed x-user-role header"))?;

    request.extensions_mut().insert(Caller { user_id, role });

    Ok(next.run(request).await)
}

fn unauthenticated(message: &str) -> Response {
    AppError::with_message(ErrorCode::NotAuthenticated, message).into_response()
}
