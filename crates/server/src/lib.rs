use axum::{http::StatusCode, response::IntoResponse};
use engine::EngineError;

pub use auth::Identity;
pub use server::{ServerState, router, run_with_listener};
pub use session::{SESSION_COOKIE, SessionStore};

mod auth;
mod directory;
mod pages;
mod self_service;
mod server;
mod session;

/// Error returned by handlers, rendered as a plain-text response.
#[derive(Debug)]
pub struct ServerError(EngineError);

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::MissingField(_)
        | EngineError::InvalidField(_)
        | EngineError::InvalidDate(_) => StatusCode::BAD_REQUEST,
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::ExistingKey(_) => StatusCode::CONFLICT,
        EngineError::InvalidCredentials => StatusCode::UNAUTHORIZED,
        EngineError::Forbidden(_) => StatusCode::FORBIDDEN,
        EngineError::PasswordHash(_) | EngineError::Database(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::PasswordHash(reason) => {
            tracing::error!("password hashing failed: {reason}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let status = status_for_engine_error(&self.0);
        (status, message_for_engine_error(self.0)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: EngineError) -> StatusCode {
        ServerError::from(err).into_response().status()
    }

    #[test]
    fn validation_errors_map_to_400() {
        assert_eq!(
            status_of(EngineError::MissingField("id".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(EngineError::InvalidField("id".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(EngineError::InvalidDate("2025-13-40".to_string())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn engine_not_found_maps_to_404() {
        assert_eq!(
            status_of(EngineError::KeyNotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn engine_conflict_maps_to_409() {
        assert_eq!(
            status_of(EngineError::ExistingKey("x".to_string())),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn auth_errors_map_to_401_and_403() {
        assert_eq!(
            status_of(EngineError::InvalidCredentials),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            status_of(EngineError::Forbidden("admins only".to_string())),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn database_errors_hide_details() {
        let res = ServerError::from(EngineError::Database(sea_orm::DbErr::Custom(
            "disk on fire".to_string(),
        )))
        .into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn hashing_failures_are_internal_errors() {
        assert_eq!(
            status_of(EngineError::PasswordHash("task panicked".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            message_for_engine_error(EngineError::PasswordHash("task panicked".to_string())),
            "internal server error"
        );
    }
}
