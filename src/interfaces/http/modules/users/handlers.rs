//! User operations API handler
//!
//! One POST endpoint multiplexes every action. The handler only translates
//! the wire envelope; all decisions are made by `UserDispatcher`.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::dto::{OperationData, OperationRequest};
use crate::application::{OperationError, UserDispatcher};
use crate::interfaces::http::common::{ApiResponse, EmptyData, EnvelopeJson};

/// User handler state
#[derive(Clone)]
pub struct UserHandlerState {
    pub dispatcher: Arc<UserDispatcher>,
}

/// HTTP status for each operation failure
pub fn error_status(err: &OperationError) -> StatusCode {
    match err {
        OperationError::Validation(_)
        | OperationError::MissingField(_)
        | OperationError::InvalidAction(_) => StatusCode::BAD_REQUEST,
        OperationError::Authentication => StatusCode::UNAUTHORIZED,
        OperationError::NotFound => StatusCode::NOT_FOUND,
        OperationError::DuplicateEmail => StatusCode::CONFLICT,
        OperationError::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for OperationError {
    fn into_response(self) -> Response {
        let status = error_status(&self);
        (status, Json(ApiResponse::<EmptyData>::error(self.to_string()))).into_response()
    }
}

#[utoipa::path(
    post,
    path = "/api/users/operations",
    tag = "Users",
    request_body = OperationRequest,
    responses(
        (status = 200, description = "Action succeeded", body = ApiResponse<OperationData>),
        (status = 400, description = "Missing field, invalid input or unknown action", body = ApiResponse<EmptyData>),
        (status = 401, description = "Unknown email on login", body = ApiResponse<EmptyData>),
        (status = 404, description = "User not found", body = ApiResponse<EmptyData>),
        (status = 409, description = "Email already registered", body = ApiResponse<EmptyData>),
        (status = 500, description = "Server error", body = ApiResponse<EmptyData>)
    )
)]
pub async fn user_operations(
    State(state): State<UserHandlerState>,
    EnvelopeJson(request): EnvelopeJson<OperationRequest>,
) -> Result<Json<ApiResponse<OperationData>>, OperationError> {
    let outcome = state.dispatcher.dispatch(request.into()).await?;
    Ok(Json(outcome.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_follow_error_taxonomy() {
        let cases = [
            (OperationError::Validation("bad".into()), 400),
            (OperationError::MissingField("Name and email are required"), 400),
            (OperationError::InvalidAction(None), 400),
            (OperationError::Authentication, 401),
            (OperationError::NotFound, 404),
            (OperationError::DuplicateEmail, 409),
            (OperationError::Server("boom".into()), 500),
        ];
        for (err, status) in cases {
            assert_eq!(error_status(&err).as_u16(), status, "{err:?}");
        }
    }
}
