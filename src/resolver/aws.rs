// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! AWS Secrets Manager backed resolver.
//!
//! Credentials always come from the AWS default provider chain. The region is
//! taken from `SECRETS_MANAGER_REGION` when set, then the default chain, then
//! `us-east-1`.

use async_trait::async_trait;
use aws_config::meta::region::RegionProviderChain;
use aws_config::BehaviorVersion;
use aws_sdk_secretsmanager::config::Region;
use aws_sdk_secretsmanager::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_secretsmanager::operation::get_secret_value::GetSecretValueError;
use aws_sdk_secretsmanager::Client;
use tracing::debug;

use super::{ResolveError, SecretResolver, SecretValue};
use crate::config::{Config, FALLBACK_REGION};

#[derive(Clone, Debug)]
pub struct AwsSecretsManager {
    client: Client,
}

impl AwsSecretsManager {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the ambient AWS configuration plus the region and
    /// endpoint overrides in `config`.
    pub async fn from_config(config: &Config) -> Self {
        let shared = aws_config::defaults(BehaviorVersion::latest())
            .region(region_chain(config.region.clone()))
            .load()
            .await;

        let mut builder = aws_sdk_secretsmanager::config::Builder::from(&shared);
        if let Some(endpoint) = config.endpoint_url.as_deref() {
            builder = builder.endpoint_url(endpoint);
        }

        Self::new(Client::from_conf(builder.build()))
    }
}

fn region_chain(region_override: Option<String>) -> RegionProviderChain {
    RegionProviderChain::first_try(region_override.map(Region::new))
        .or_default_provider()
        .or_else(Region::new(FALLBACK_REGION))
}

#[async_trait]
impl SecretResolver for AwsSecretsManager {
    async fn fetch(&self, secret_id: &str) -> Result<SecretValue, ResolveError> {
        debug!(secret_id, "Fetching secret value");

        let output = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|err| classify_sdk_error(secret_id, err))?;

        output
            .secret_string()
            .map(SecretValue::new)
            .ok_or(ResolveError::NoStringValue)
    }
}

fn classify_sdk_error<R>(secret_id: &str, err: SdkError<GetSecretValueError, R>) -> ResolveError
where
    R: std::fmt::Debug + Send + Sync + 'static,
{
    let transport = match &err {
        SdkError::TimeoutError(_) => Some("timeout"),
        SdkError::DispatchFailure(_) => Some("dispatch failure"),
        SdkError::ResponseError(_) => Some("unreadable response"),
        _ => None,
    };
    if let Some(kind) = transport {
        debug!(secret_id, error = %DisplayErrorContext(&err), "Secrets Manager call failed");
        return ResolveError::Transport(kind);
    }

    match err {
        SdkError::ServiceError(context) => classify_service_error(secret_id, context.into_err()),
        other => {
            debug!(secret_id, error = %DisplayErrorContext(&other), "Secrets Manager call failed");
            ResolveError::Service("request construction".to_string())
        }
    }
}

/// Map a service error to a [`ResolveError`] carrying only the error code.
/// The store's message, which usually names the secret, goes to debug logs.
fn classify_service_error(secret_id: &str, err: GetSecretValueError) -> ResolveError {
    debug!(secret_id, error = %DisplayErrorContext(&err), "Secrets Manager rejected request");

    let code = err.code().unwrap_or("unknown").to_string();
    match &err {
        GetSecretValueError::ResourceNotFoundException(_) => ResolveError::NotFound,
        GetSecretValueError::InvalidParameterException(_)
        | GetSecretValueError::InvalidRequestException(_) => ResolveError::InvalidRequest(code),
        _ if err.code() == Some("AccessDeniedException") => ResolveError::AccessDenied,
        _ => ResolveError::Service(code),
    }
}
