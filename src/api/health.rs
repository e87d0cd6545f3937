// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::state::AppState;

/// Readiness response with individual component status.
#[derive(Debug, Serialize, ToSchema)]
pub struct ReadyResponse {
    /// Overall status ("ok" or "degraded").
    pub status: String,
    pub checks: HealthChecks,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthChecks {
    /// Whether the service process is running.
    pub service: String,
    /// Whether a secret identifier is configured. Never reveals the identifier.
    pub secret_id: String,
}

/// Simple health check response for liveness probes.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

/// Liveness probe handler.
///
/// Always returns 200 if the process is running.
#[utoipa::path(
    get,
    path = "/health/live",
    tag = "Health",
    responses(
        (status = 200, description = "Service is alive", body = HealthResponse)
    )
)]
pub async fn liveness() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// Readiness probe handler.
///
/// Does not contact the secret store; secret traffic only happens on `GET /`.
#[utoipa::path(
    get,
    path = "/health/ready",
    tag = "Health",
    responses(
        (status = 200, description = "Service is ready", body = ReadyResponse),
        (status = 503, description = "Service is not ready", body = ReadyResponse)
    )
)]
pub async fn readiness(State(state): State<AppState>) -> (StatusCode, Json<ReadyResponse>) {
    let configured = !state.config.secret_id.trim().is_empty();

    let response = ReadyResponse {
        status: if configured { "ok" } else { "degraded" }.to_string(),
        checks: HealthChecks {
            service: "ok".to_string(),
            secret_id: if configured { "configured" } else { "missing" }.to_string(),
        },
    };

    let status = if configured {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

#[cfg(test)]
mod tests {
    use crate::api::router;
    use crate::api::test_support::{app, get, test_config, TEST_ARN};
    use crate::state::AppState;
    use crate::resolver::{ResolveError, SecretResolver, SecretValue};
    use async_trait::async_trait;
    use axum::http::StatusCode;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    #[derive(Default)]
    struct Counting(AtomicUsize);

    #[async_trait]
    impl SecretResolver for Counting {
        async fn fetch(&self, _secret_id: &str) -> Result<SecretValue, ResolveError> {
            self.0.fetch_add(1, Ordering::SeqCst);
            Ok(SecretValue::new("value"))
        }
    }

    #[tokio::test]
    async fn liveness_is_ok() {
        let router = app(Arc::new(Counting::default()), Duration::from_secs(1));
        let (status, body) = get(router, "/health/live").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"status":"ok"}"#);
    }

    #[tokio::test]
    async fn readiness_does_not_touch_store_or_leak_identifier() {
        let resolver = Arc::new(Counting::default());
        let router = app(resolver.clone(), Duration::from_secs(1));
        let (status, body) = get(router, "/health/ready").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["checks"]["secret_id"], "configured");
        assert!(!body.contains(TEST_ARN));
        assert_eq!(resolver.0.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn readiness_reports_missing_identifier_as_unavailable() {
        let mut config = test_config(Duration::from_secs(1));
        config.secret_id = "  ".to_string();
        let router = router(AppState::new(config, Arc::new(Counting::default())));

        let (status, body) = get(router, "/health/ready").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["checks"]["service"], "ok");
        assert_eq!(json["checks"]["secret_id"], "missing");
    }
}
