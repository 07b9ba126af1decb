// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session id extraction for the server.
//!
//! Every `/sessions/{sid}` route identifies the browsing session by its path
//! segment. The id is checked once here so handlers can pass it straight to
//! persistence.

use axum::{
    Json,
    extract::{FromRequestParts, Path},
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use sambhram_persistence::Scope;
use tracing::{debug, warn};

use crate::{AppState, ErrorResponse};

/// Extractor for the browsing session id in the request path.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     SessionId(session_id): SessionId,
/// ) -> Result<Json<Response>, HttpError> {
///     // session_id: String, already validated
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Errors
///
/// Returns HTTP 400 Bad Request if:
/// - the path has no session segment
/// - the id is empty, contains whitespace or contains `:`
pub struct SessionId(pub String);

impl FromRequestParts<AppState> for SessionId {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(raw): Path<String> = Path::from_request_parts(parts, state)
            .await
            .map_err(|e| {
                debug!(error = %e, "Missing session id");
                SessionError::MissingSessionId
            })?;

        Scope::session(&raw).map_err(|e| {
            warn!(session_id = %raw, "Rejected session id");
            SessionError::InvalidSessionId(e.to_string())
        })?;

        Ok(Self(raw))
    }
}

/// Session id extraction errors.
#[derive(Debug)]
pub enum SessionError {
    /// The route has no session id segment.
    MissingSessionId,
    /// The session id cannot be used as a storage scope.
    InvalidSessionId(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingSessionId => String::from("Missing session id"),
            Self::InvalidSessionId(reason) => reason,
        };

        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: true,
                message,
            }),
        )
            .into_response()
    }
}
