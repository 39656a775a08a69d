//! In-memory property source

use async_trait::async_trait;

use super::traits::PropertySource;
use crate::error::LoadResult;
use crate::types::PropertyMap;

/// Fixed set of properties, for testing and for embedding defaults
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    name: String,
    properties: PropertyMap,
}

impl MemorySource {
    pub fn new(name: impl Into<String>, properties: PropertyMap) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }

    /// Create a source from key/value pairs
    pub fn with_properties<K, V>(name: impl Into<String>, properties: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self::new(name, properties.into_iter().collect())
    }
}

#[async_trait]
impl PropertySource for MemorySource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> LoadResult<PropertyMap> {
        Ok(self.properties.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_source_returns_copy() {
        let source = MemorySource::with_properties("defaults", [("hacker.name", "Agent")]);

        let mut first = source.load().await.unwrap();
        first.insert("hacker.name", "changed");

        let second = source.load().await.unwrap();
        assert_eq!(second.get("hacker.name"), Some("Agent"));
        assert_eq!(source.name(), "defaults");
    }
}
