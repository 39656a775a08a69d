//! In-memory secret resolver

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::traits::{SecretError, SecretResolver, SecretResult};

/// In-memory secret store for testing and embedding
///
/// Secrets are kept by identifier. Resolving an unknown identifier fails with
/// `SecretError::NotFound`, the same way a remote store would.
///
/// # Example
///
/// ```
/// use propstack_core::secrets::MemorySecretResolver;
///
/// let store = MemorySecretResolver::new();
/// store.put("arn:db", r#"{"password":"hunter2"}"#);
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemorySecretResolver {
    secrets: RwLock<HashMap<String, String>>,
}

impl MemorySecretResolver {
    /// Create a new empty store
    pub fn new() -> Self {
        Self {
            secrets: RwLock::new(HashMap::new()),
        }
    }

    /// Create a store with initial secrets
    pub fn with_secrets<K, V>(secrets: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            secrets: RwLock::new(
                secrets
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Store a raw secret payload under an identifier
    pub fn put(&self, secret_id: impl Into<String>, payload: impl Into<String>) {
        let mut secrets = self.secrets.write().unwrap_or_else(|e| e.into_inner());
        secrets.insert(secret_id.into(), payload.into());
    }

    pub fn len(&self) -> usize {
        self.secrets.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl SecretResolver for MemorySecretResolver {
    fn name(&self) -> &str {
        "memory"
    }

    async fn resolve(&self, secret_id: &str) -> SecretResult<String> {
        let secrets = self.secrets.read().unwrap_or_else(|e| e.into_inner());
        secrets
            .get(secret_id)
            .cloned()
            .ok_or_else(|| SecretError::not_found(secret_id, "We can't find the resource that you asked for.", None))
    }
}
