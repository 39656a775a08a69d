//! Namespace fetcher trait and error types

use async_trait::async_trait;
use thiserror::Error;

use crate::error::BoxError;
use crate::types::PropertyMap;

/// Errors surfaced by a parameter store while listing a namespace
#[derive(Error, Debug)]
pub enum NamespaceError {
    /// The store failed on its side; the caller may retry the whole pass
    #[error("Failed to load parameters at '{path}': {message}")]
    ServerError {
        path: String,
        message: String,
        #[source]
        cause: Option<BoxError>,
    },

    /// The request itself was rejected (bad path, key id or filter)
    #[error("Invalid parameter request for '{path}': {message}")]
    InvalidParameter {
        path: String,
        message: String,
        #[source]
        cause: Option<BoxError>,
    },

    /// A parameter or parameter version under the path does not exist
    #[error("Parameter not found at '{path}': {message}")]
    NotFound {
        path: String,
        message: String,
        #[source]
        cause: Option<BoxError>,
    },
}

impl NamespaceError {
    pub fn server_error(path: impl Into<String>, message: impl Into<String>, cause: Option<BoxError>) -> Self {
        Self::ServerError {
            path: path.into(),
            message: message.into(),
            cause,
        }
    }

    pub fn invalid_parameter(path: impl Into<String>, message: impl Into<String>, cause: Option<BoxError>) -> Self {
        Self::InvalidParameter {
            path: path.into(),
            message: message.into(),
            cause,
        }
    }

    pub fn not_found(path: impl Into<String>, message: impl Into<String>, cause: Option<BoxError>) -> Self {
        Self::NotFound {
            path: path.into(),
            message: message.into(),
            cause,
        }
    }

    /// The namespace path the failing request was made for
    pub fn path(&self) -> &str {
        match self {
            Self::ServerError { path, .. } | Self::InvalidParameter { path, .. } | Self::NotFound { path, .. } => path,
        }
    }

    /// Whether retrying the resolution pass could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ServerError { .. })
    }
}

pub type NamespaceResult<T> = Result<T, NamespaceError>;

/// Lists every entry below a namespace prefix of a remote parameter store
///
/// Implementations:
/// - `MemoryNamespaceFetcher`: In-memory for testing and embedding
/// - `SsmNamespaceFetcher`: AWS Systems Manager Parameter Store (feature `aws`)
///
/// Implementations drain pagination, decrypt encrypted values and recurse into
/// sub-paths. Returned keys are full paths; values are returned untouched.
#[async_trait]
pub trait NamespaceFetcher: Send + Sync {
    /// Human-readable name of the backing store
    fn name(&self) -> &str;

    /// Fetch all entries whose full path starts with `prefix`
    async fn fetch(&self, prefix: &str) -> NamespaceResult<PropertyMap>;
}
