//! Secret resolution and payload flattening
//!
//! This module provides:
//! - `SecretResolver` trait for looking up raw secret payloads by identifier
//! - `flatten` for turning a JSON payload into flat dotted properties
//! - Built-in resolvers: `MemorySecretResolver`, `SecretsManagerResolver` (feature `aws`)

mod traits;
mod flatten;
mod memory_store;
#[cfg(feature = "aws")]
mod secrets_manager;

pub use traits::{SecretResolver, SecretError, SecretResult};
pub use flatten::{flatten, SecretShapeError};
pub use memory_store::MemorySecretResolver;
#[cfg(feature = "aws")]
pub use secrets_manager::SecretsManagerResolver;
