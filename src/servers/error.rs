use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::auth::IdentityError;
use crate::game::GameError;
use crate::services::{ServiceError, StoreError};

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorBody,
}

/// Request-scoped failure rendered as `{"error": {"message": ...}}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            log::error!("❌ {} {}", self.status, self.message);
        } else {
            log::debug!("rejected request: {} {}", self.status, self.message);
        }

        let body = ErrorResponse {
            error: ErrorBody {
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn game_status(err: &GameError) -> StatusCode {
    match err {
        GameError::InvalidName | GameError::InvalidDimensions { .. } | GameError::UnknownEdge(_) => {
            StatusCode::BAD_REQUEST
        }
        GameError::NotOwner | GameError::NotYourTurn => StatusCode::FORBIDDEN,
        GameError::GameAlreadyStarted
        | GameError::InsufficientPlayers { .. }
        | GameError::GameNotStarted
        | GameError::AlreadyClaimed(_) => StatusCode::CONFLICT,
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        let status = match &err {
            ServiceError::Game(e) => game_status(e),
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::InvalidAction(_) | ServiceError::MissingParameter(_) => {
                StatusCode::BAD_REQUEST
            }
            ServiceError::NotAPlayer => StatusCode::FORBIDDEN,
            ServiceError::Store(StoreError::Conflict { .. }) => StatusCode::CONFLICT,
            ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}

impl From<IdentityError> for ApiError {
    fn from(err: IdentityError) -> Self {
        let status = match &err {
            IdentityError::MissingCredential | IdentityError::InvalidCredential(_) => {
                StatusCode::UNAUTHORIZED
            }
            IdentityError::UnknownPlayer(_) => StatusCode::NOT_FOUND,
            IdentityError::Upstream(_) | IdentityError::UpstreamStatus(_) => {
                StatusCode::BAD_GATEWAY
            }
            IdentityError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self::new(status, err.to_string())
    }
}
