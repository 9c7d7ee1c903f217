//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Map this error code to an HTTP status code
    pub fn http_status(&self) -> StatusCode {
        match self {
            ErrorCode::Success => StatusCode::OK,

            // Missing resources
            ErrorCode::NotFound
            | ErrorCode::SpaNotFound
            | ErrorCode::SpaNotApproved
            | ErrorCode::ServiceNotFound
            | ErrorCode::StaffNotFound
            | ErrorCode::CustomerNotFound
            | ErrorCode::BookingNotFound
            | ErrorCode::PaymentNotFound
            | ErrorCode::PayoutNotFound => StatusCode::NOT_FOUND,

            // Auth
            ErrorCode::NotAuthenticated => StatusCode::UNAUTHORIZED,

            // Permission
            ErrorCode::PermissionDenied | ErrorCode::RoleRequired | ErrorCode::AdminRequired => {
                StatusCode::FORBIDDEN
            }

            // Conflicts
            ErrorCode::AlreadyExists => StatusCode::CONFLICT,

            // System
            ErrorCode::Unknown
            | ErrorCode::InternalError
            | ErrorCode::DatabaseError
            | ErrorCode::ConfigError => StatusCode::INTERNAL_SERVER_ERROR,

            // Everything else is a client error: validation failures, coupon
            // rejections, disallowed transitions, payout preconditions
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
