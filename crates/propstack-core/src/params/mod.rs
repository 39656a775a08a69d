//! Remote parameter store namespaces
//!
//! - `NamespaceFetcher` trait: list every parameter below a path prefix
//! - `MemoryNamespaceFetcher`: In-memory for testing
//! - `SsmNamespaceFetcher`: AWS Systems Manager Parameter Store (feature `aws`)

mod traits;
mod memory;
#[cfg(feature = "aws")]
mod ssm;

pub use traits::{NamespaceFetcher, NamespaceError, NamespaceResult};
pub use memory::MemoryNamespaceFetcher;
#[cfg(feature = "aws")]
pub use ssm::SsmNamespaceFetcher;
