use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::shared::structs::discord::interaction::InteractionType;

/// Every way an inbound interaction request can fail. Each variant maps to
/// exactly one HTTP status.
#[derive(Debug, thiserror::Error)]
pub enum InteractionError {
    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("bad request: {0}")]
    BadRequest(&'static str),

    #[error("request signature did not verify")]
    Unauthorized,

    #[error("unprocessable interaction type: {0:?}")]
    UnprocessableType(InteractionType),

    #[error("failed to read request body: {0}")]
    ReadFailure(String),

    #[error("failed to decode interaction payload: {0}")]
    DecodeFailure(String),

    #[error("failed to publish interaction: {0:?}")]
    PublishFailure(anyhow::Error),

    #[error("signature verifier fault: {0}")]
    VerifierFault(String),
}

impl InteractionError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            InteractionError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            InteractionError::BadRequest(_) => StatusCode::BAD_REQUEST,
            InteractionError::Unauthorized => StatusCode::UNAUTHORIZED,
            InteractionError::UnprocessableType(_) => StatusCode::UNPROCESSABLE_ENTITY,
            InteractionError::ReadFailure(_)
            | InteractionError::DecodeFailure(_)
            | InteractionError::PublishFailure(_)
            | InteractionError::VerifierFault(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for InteractionError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!("{}", &self);
        } else {
            tracing::debug!("Rejected interaction request: {}", &self);
        }

        match self {
            InteractionError::Unauthorized => (status, "Unauthorized").into_response(),
            _ => status.into_response(),
        }
    }
}
