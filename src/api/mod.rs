// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{error::ErrorBody, state::AppState};

pub mod health;
pub mod secret;

pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/", get(secret::get_secret))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(state);

    routes
        .merge(SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id()),
        )
}

#[derive(OpenApi)]
#[openapi(
    paths(secret::get_secret, health::liveness, health::readiness),
    components(schemas(ErrorBody, health::HealthResponse, health::ReadyResponse, health::HealthChecks)),
    tags(
        (name = "Secret", description = "Configured secret value"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct ApiDoc;

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::resolver::SecretResolver;
    use crate::state::AppState;

    pub const TEST_ARN: &str = "arn:aws:secretsmanager:us-east-1:123456789012:secret:foo";

    pub fn test_config(fetch_timeout: Duration) -> Config {
        Config {
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            secret_id: TEST_ARN.to_string(),
            fetch_timeout,
            region: None,
            endpoint_url: None,
        }
    }

    pub fn app(resolver: Arc<dyn SecretResolver>, fetch_timeout: Duration) -> Router {
        super::router(AppState::new(test_config(fetch_timeout), resolver))
    }

    pub async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }
}
