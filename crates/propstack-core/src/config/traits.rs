//! Property source trait

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::LoadResult;
use crate::types::PropertyMap;

/// A named, lazily evaluated producer of properties
///
/// Implementations:
/// - `FileSource`: `.properties` file from the working directory or a resource directory
/// - `RemoteSource`: parameter store prefix named by a trigger variable
/// - `MemorySource`: In-memory for testing and embedding
///
/// A source that is simply absent (missing file, unset variable) returns an
/// empty map rather than an error.
#[async_trait]
pub trait PropertySource: Send + Sync {
    /// Human-readable name used in logs
    fn name(&self) -> &str;

    /// Produce this source's properties
    async fn load(&self) -> LoadResult<PropertyMap>;
}

/// Type alias for an Arc-wrapped source
pub type SharedSource = Arc<dyn PropertySource>;
