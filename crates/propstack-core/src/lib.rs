//! Propstack Core
//!
//! Layered property resolution for services. A single resolution pass merges
//! several optional sources into one flat string to string snapshot:
//! bundled `.properties` files, local override files, and a remote parameter
//! store prefix whose secret references are expanded from a secret store.
//!
//! ## Precedence
//!
//! Later sources overwrite earlier ones key by key:
//! 1. `application.properties` (resource directory)
//! 2. the parameter store prefix named by `SSM_PREFIX`
//! 3. `overrides.properties` (working directory)
//! 4. `application-test.properties` (resource directory)
//! 5. `overrides-test.properties` (working directory)
//!
//! ```rust,ignore
//! use propstack_core::{load_properties, Properties};
//!
//! let properties = load_properties().await?;
//! let url = properties.string_not_empty("database.url")?;
//! let pool = properties.int("database.pool.size")?.unwrap_or(10);
//! ```
//!
//! Remote collaborators sit behind traits (`NamespaceFetcher`,
//! `SecretResolver`) with in-memory implementations for tests. The AWS
//! Parameter Store and Secrets Manager implementations are enabled by the
//! default `aws` feature.

pub mod types;
pub mod error;
pub mod params;
pub mod secrets;
pub mod config;
pub mod resolver;
pub mod accessors;
#[cfg(feature = "aws")]
pub mod aws;

// Re-export commonly used types
pub use types::PropertyMap;

pub use error::{LoadError, LoadResult, BoxError};

pub use params::{NamespaceFetcher, NamespaceError, NamespaceResult, MemoryNamespaceFetcher};
#[cfg(feature = "aws")]
pub use params::SsmNamespaceFetcher;

pub use secrets::{
    SecretResolver, SecretError, SecretResult, MemorySecretResolver,
    flatten, SecretShapeError,
};
#[cfg(feature = "aws")]
pub use secrets::SecretsManagerResolver;

pub use config::{
    PropertySource, SharedSource, FileSource, FileLocation,
    RemoteSource, RemoteBackend, MemorySource, EnvLookup,
};

pub use resolver::{
    PrefixResolver, PropertyLayerMerger,
    PropertiesLoader, LoaderOptions, load_properties,
};

pub use accessors::{Properties, PropertyError, PropertyResult};

#[cfg(feature = "aws")]
pub use aws::AwsClientBuilder;
