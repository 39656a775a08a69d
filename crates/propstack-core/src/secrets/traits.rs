//! Core traits and types for secret resolution

use async_trait::async_trait;
use thiserror::Error;

use crate::error::BoxError;

/// Errors that can occur while resolving a secret identifier
///
/// Every variant is terminal for the current resolution pass. Only
/// `InternalError` is worth retrying, and retrying is left to the caller.
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("Secret '{secret_id}' not found: {message}")]
    NotFound {
        secret_id: String,
        message: String,
        #[source]
        cause: Option<BoxError>,
    },

    /// Invalid parameter, secret marked deleted, misconfigured rotation, or a
    /// secret without a string payload
    #[error("Invalid request for secret '{secret_id}': {message}")]
    InvalidRequest {
        secret_id: String,
        message: String,
        #[source]
        cause: Option<BoxError>,
    },

    #[error("Failed to decrypt secret '{secret_id}': {message}")]
    DecryptionFailure {
        secret_id: String,
        message: String,
        #[source]
        cause: Option<BoxError>,
    },

    #[error("Secret store error for '{secret_id}': {message}")]
    InternalError {
        secret_id: String,
        message: String,
        #[source]
        cause: Option<BoxError>,
    },
}

impl SecretError {
    pub fn not_found(secret_id: impl Into<String>, message: impl Into<String>, cause: Option<BoxError>) -> Self {
        Self::NotFound {
            secret_id: secret_id.into(),
            message: message.into(),
            cause,
        }
    }

    pub fn invalid_request(secret_id: impl Into<String>, message: impl Into<String>, cause: Option<BoxError>) -> Self {
        Self::InvalidRequest {
            secret_id: secret_id.into(),
            message: message.into(),
            cause,
        }
    }

    pub fn decryption_failure(secret_id: impl Into<String>, message: impl Into<String>, cause: Option<BoxError>) -> Self {
        Self::DecryptionFailure {
            secret_id: secret_id.into(),
            message: message.into(),
            cause,
        }
    }

    pub fn internal_error(secret_id: impl Into<String>, message: impl Into<String>, cause: Option<BoxError>) -> Self {
        Self::InternalError {
            secret_id: secret_id.into(),
            message: message.into(),
            cause,
        }
    }

    /// The identifier that failed to resolve
    pub fn secret_id(&self) -> &str {
        match self {
            Self::NotFound { secret_id, .. }
            | Self::InvalidRequest { secret_id, .. }
            | Self::DecryptionFailure { secret_id, .. }
            | Self::InternalError { secret_id, .. } => secret_id,
        }
    }

    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::InternalError { .. })
    }
}

pub type SecretResult<T> = Result<T, SecretError>;

/// Resolves a secret identifier to its raw payload
///
/// Implementations:
/// - `MemorySecretResolver`: In-memory for testing and embedding
/// - `SecretsManagerResolver`: AWS Secrets Manager (feature `aws`)
///
/// The payload is returned exactly as stored; interpreting it is the job of
/// [`flatten`](super::flatten).
#[async_trait]
pub trait SecretResolver: Send + Sync {
    /// Human-readable name of this store
    fn name(&self) -> &str;

    /// Fetch the raw payload of the secret identified by `secret_id`
    async fn resolve(&self, secret_id: &str) -> SecretResult<String>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_error_accessors() {
        let err = SecretError::decryption_failure("arn:db", "KMS key disabled", None);
        assert_eq!(err.secret_id(), "arn:db");
        assert!(!err.is_retryable());
        assert_eq!(err.to_string(), "Failed to decrypt secret 'arn:db': KMS key disabled");

        assert!(SecretError::internal_error("arn:db", "boom", None).is_retryable());
        assert!(!SecretError::not_found("arn:db", "gone", None).is_retryable());
        assert!(!SecretError::invalid_request("arn:db", "deleted", None).is_retryable());
    }
}
