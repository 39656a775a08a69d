//! In-memory namespace fetcher

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use super::traits::{NamespaceFetcher, NamespaceResult};
use crate::types::PropertyMap;

/// In-memory parameter store for testing and embedding
///
/// Parameters are stored under their full path. A fetch returns every
/// parameter whose path starts with the requested prefix, which matches the
/// recursive listing of a real parameter store.
///
/// # Example
///
/// ```
/// use propstack_core::params::MemoryNamespaceFetcher;
///
/// let store = MemoryNamespaceFetcher::new();
/// store.put("/app/prod/config/db.host", "db.internal");
/// assert_eq!(store.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct MemoryNamespaceFetcher {
    parameters: RwLock<BTreeMap<String, String>>,
}

impl MemoryNamespaceFetcher {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            parameters: RwLock::new(BTreeMap::new()),
        }
    }

    /// Create a store with initial parameters
    pub fn with_parameters<K, V>(parameters: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            parameters: RwLock::new(
                parameters
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }

    /// Store a parameter under its full path
    pub fn put(&self, path: impl Into<String>, value: impl Into<String>) {
        let mut parameters = self.parameters.write().unwrap_or_else(|e| e.into_inner());
        parameters.insert(path.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.parameters.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl NamespaceFetcher for MemoryNamespaceFetcher {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch(&self, prefix: &str) -> NamespaceResult<PropertyMap> {
        let parameters = self.parameters.read().unwrap_or_else(|e| e.into_inner());
        Ok(parameters
            .range(prefix.to_string()..)
            .take_while(|(path, _)| path.starts_with(prefix))
            .map(|(path, value)| (path.clone(), value.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fetch_is_recursive_and_prefix_scoped() {
        let store = MemoryNamespaceFetcher::with_parameters([
            ("/app/config/db.host", "localhost"),
            ("/app/config/nested/db.port", "5432"),
            ("/app/secrets/db", "arn:db"),
            ("/other/config/db.host", "elsewhere"),
        ]);

        let params = store.fetch("/app/config/").await.unwrap();

        assert_eq!(params.len(), 2);
        assert_eq!(params.get("/app/config/db.host"), Some("localhost"));
        assert_eq!(params.get("/app/config/nested/db.port"), Some("5432"));
    }

    #[tokio::test]
    async fn test_fetch_unknown_prefix_is_empty() {
        let store = MemoryNamespaceFetcher::new();
        store.put("/app/config/a", "1");

        assert!(store.fetch("/missing/").await.unwrap().is_empty());
    }

    #[test]
    fn test_put_overwrites() {
        let store = MemoryNamespaceFetcher::new();
        store.put("/app/config/a", "1");
        store.put("/app/config/a", "2");
        assert_eq!(store.len(), 1);
    }
}
