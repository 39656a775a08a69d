//! Resolution pass error types

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::params::NamespaceError;
use crate::secrets::{SecretError, SecretShapeError};

/// Boxed underlying cause carried by collaborator errors
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that abort a resolution pass
///
/// Resolution is all-or-nothing: any of these discards everything loaded so
/// far. Absent files and an unset trigger variable are not errors.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Namespace(#[from] NamespaceError),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    SecretShape(#[from] SecretShapeError),

    #[error("Invalid parameter store prefix '{0}': the prefix must not be empty")]
    InvalidPrefix(String),

    #[error("Failed to read properties file '{}': {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Variable '{variable}' is set but no remote parameter store backend is configured")]
    NoRemoteBackend { variable: String },
}

impl LoadError {
    /// Whether the failure came from a transient remote-store fault
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Namespace(e) => e.is_retryable(),
            Self::Secret(e) => e.is_retryable(),
            _ => false,
        }
    }
}

pub type LoadResult<T> = Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_follows_collaborator() {
        let err: LoadError = NamespaceError::server_error("/app/config/", "boom", None).into();
        assert!(err.is_retryable());

        let err: LoadError = SecretError::not_found("arn:db", "gone", None).into();
        assert!(!err.is_retryable());

        assert!(!LoadError::InvalidPrefix(String::new()).is_retryable());
    }

    #[test]
    fn test_transparent_messages() {
        let err: LoadError = SecretError::internal_error("arn:db", "An error occurred on the server side", None).into();
        assert_eq!(err.to_string(), "Secret store error for 'arn:db': An error occurred on the server side");
    }
}
