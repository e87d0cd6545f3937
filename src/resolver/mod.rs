// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Secret Resolver
//!
//! Looks up the current value of a secret by identifier. Every call goes to
//! the backing store; nothing is cached between calls.
//!
//! ## Modules
//!
//! - `aws` - AWS Secrets Manager implementation

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

pub mod aws;

pub use aws::AwsSecretsManager;

/// Opaque secret payload as returned by the store.
///
/// `Debug` is redacted so the value cannot end up in logs by accident.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretValue(String);

impl SecretValue {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for SecretValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretValue(<redacted>)")
    }
}

/// Resolution failure.
///
/// Messages never carry the secret identifier or the store's own error text,
/// which often repeats it. Those are logged at debug level where the error is
/// classified.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("secret was not found")]
    NotFound,

    #[error("access to secret denied")]
    AccessDenied,

    #[error("secret store rejected the request ({0})")]
    InvalidRequest(String),

    #[error("secret store did not answer within {0:?}")]
    Timeout(Duration),

    #[error("secret store unreachable ({0})")]
    Transport(&'static str),

    #[error("secret holds no string value")]
    NoStringValue,

    #[error("secret store error ({0})")]
    Service(String),
}

/// A source of secret values.
#[async_trait]
pub trait SecretResolver: Send + Sync {
    /// Fetch the current value of `secret_id`. One store round trip, no retry.
    async fn fetch(&self, secret_id: &str) -> Result<SecretValue, ResolveError>;
}

/// Run [`SecretResolver::fetch`] bounded by `timeout`.
pub async fn fetch_with_timeout(
    resolver: &dyn SecretResolver,
    secret_id: &str,
    timeout: Duration,
) -> Result<SecretValue, ResolveError> {
    match tokio::time::timeout(timeout, resolver.fetch(secret_id)).await {
        Ok(result) => result,
        Err(_) => Err(ResolveError::Timeout(timeout)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    #[async_trait]
    impl SecretResolver for Fixed {
        async fn fetch(&self, _secret_id: &str) -> Result<SecretValue, ResolveError> {
            Ok(SecretValue::new(self.0))
        }
    }

    struct Stalled;

    #[async_trait]
    impl SecretResolver for Stalled {
        async fn fetch(&self, _secret_id: &str) -> Result<SecretValue, ResolveError> {
            std::future::pending().await
        }
    }

    #[test]
    fn debug_output_hides_the_value() {
        let value = SecretValue::new("hunter2");
        let rendered = format!("{value:?}");
        assert!(!rendered.contains("hunter2"));
        assert_eq!(value.expose(), "hunter2");
    }

    #[test]
    fn error_messages_leave_out_the_identifier() {
        let arn = "arn:aws:secretsmanager:us-east-1:123456789012:secret:foo";
        let errors = [
            ResolveError::NotFound,
            ResolveError::AccessDenied,
            ResolveError::InvalidRequest("InvalidParameterException".to_string()),
            ResolveError::Timeout(Duration::from_secs(10)),
            ResolveError::Transport("dispatch failure"),
            ResolveError::NoStringValue,
            ResolveError::Service("InternalServiceError".to_string()),
        ];

        for err in errors {
            let message = err.to_string();
            assert!(!message.contains(arn), "{message}");
            assert!(!message.contains("secret:foo"), "{message}");
        }
    }

    #[tokio::test]
    async fn fetch_with_timeout_passes_value_through() {
        let value = fetch_with_timeout(&Fixed("v"), "id", Duration::from_secs(1))
            .await
            .unwrap();
        assert_eq!(value.into_inner(), "v");
    }

    #[tokio::test]
    async fn fetch_with_timeout_gives_up_on_stalled_store() {
        let err = fetch_with_timeout(&Stalled, "id", Duration::from_millis(20))
            .await
            .unwrap_err();
        assert!(matches!(err, ResolveError::Timeout(d) if d == Duration::from_millis(20)));
    }
}
