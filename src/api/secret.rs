// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The secret endpoint.

use axum::extract::State;
use tracing::error;

use crate::error::{ApiError, ErrorBody};
use crate::resolver::fetch_with_timeout;
use crate::state::AppState;

/// Body returned for every resolution failure. The cause is only logged.
pub const SECRET_UNAVAILABLE: &str = "failed to retrieve secret";

/// Return the current value of the configured secret.
///
/// The value is fetched from the secret store on every call and written to
/// the body unchanged.
#[utoipa::path(
    get,
    path = "/",
    tag = "Secret",
    responses(
        (status = 200, description = "Current secret value", body = String, content_type = "text/plain"),
        (status = 500, description = "Secret could not be retrieved", body = ErrorBody)
    )
)]
pub async fn get_secret(State(state): State<AppState>) -> Result<String, ApiError> {
    let config = &state.config;

    match fetch_with_timeout(state.resolver.as_ref(), &config.secret_id, config.fetch_timeout).await
    {
        Ok(value) => Ok(value.into_inner()),
        Err(err) => {
            error!(error = %err, "Failed to retrieve secret");
            Err(ApiError::internal(SECRET_UNAVAILABLE))
        }
    }
}
