//! Ordered merge of property sources
//!
//! Sources are loaded one after another in the order given. Every key of a
//! later source overwrites the same key of an earlier one; there is no
//! partial shadowing by prefix.

use std::sync::Arc;

use crate::config::{PropertySource, SharedSource};
use crate::error::LoadResult;
use crate::types::PropertyMap;

/// Merges an ordered list of sources into one snapshot
#[derive(Clone, Default)]
pub struct PropertyLayerMerger {
    sources: Vec<SharedSource>,
}

impl PropertyLayerMerger {
    /// Create a merger; sources later in the list take precedence
    pub fn new(sources: Vec<SharedSource>) -> Self {
        Self { sources }
    }

    /// Append a source with higher precedence than all current ones
    pub fn with_source(mut self, source: impl PropertySource + 'static) -> Self {
        self.sources.push(Arc::new(source));
        self
    }

    pub fn sources(&self) -> &[SharedSource] {
        &self.sources
    }

    /// Load every source in order and merge, last write wins
    ///
    /// The first failing source aborts the merge and nothing is returned.
    pub async fn resolve(&self) -> LoadResult<PropertyMap> {
        let mut properties = PropertyMap::new();

        for source in &self.sources {
            let layer = source.load().await?;
            tracing::debug!(source = source.name(), count = layer.len(), "Merging property source");
            properties.merge_from(layer);
        }

        tracing::info!(count = properties.len(), "Loaded properties in total");
        Ok(properties)
    }
}

impl std::fmt::Debug for PropertyLayerMerger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.sources.iter().map(|s| s.name()).collect();
        f.debug_struct("PropertyLayerMerger").field("sources", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use crate::config::MemorySource;
    use crate::error::LoadError;

    struct FailingSource;

    #[async_trait]
    impl PropertySource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        async fn load(&self) -> LoadResult<PropertyMap> {
            Err(LoadError::InvalidPrefix(String::new()))
        }
    }

    struct CountingSource {
        loads: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl PropertySource for CountingSource {
        fn name(&self) -> &str {
            "counting"
        }

        async fn load(&self) -> LoadResult<PropertyMap> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            Ok(PropertyMap::new())
        }
    }

    #[tokio::test]
    async fn test_no_sources_is_empty() {
        let properties = PropertyLayerMerger::default().resolve().await.unwrap();
        assert!(properties.is_empty());
    }

    #[tokio::test]
    async fn test_later_source_wins() {
        let merger = PropertyLayerMerger::default()
            .with_source(MemorySource::with_properties("base", [("hacker.name", "Agent"), ("hacker.age", "42")]))
            .with_source(MemorySource::with_properties("override", [("hacker.name", "Morpheus")]));

        let properties = merger.resolve().await.unwrap();

        assert_eq!(properties.len(), 2);
        assert_eq!(properties.get("hacker.name"), Some("Morpheus"));
        assert_eq!(properties.get("hacker.age"), Some("42"));
    }

    #[tokio::test]
    async fn test_no_partial_shadowing_by_prefix() {
        let merger = PropertyLayerMerger::default()
            .with_source(MemorySource::with_properties("base", [("db.host", "a"), ("db.port", "1")]))
            .with_source(MemorySource::with_properties("override", [("db.host", "b")]));

        let properties = merger.resolve().await.unwrap();

        // only the overwritten key changes, siblings survive
        assert_eq!(properties.get("db.host"), Some("b"));
        assert_eq!(properties.get("db.port"), Some("1"));
    }

    #[tokio::test]
    async fn test_failing_source_aborts_before_later_sources() {
        let loads = Arc::new(AtomicUsize::new(0));
        let merger = PropertyLayerMerger::default()
            .with_source(MemorySource::with_properties("base", [("a", "1")]))
            .with_source(FailingSource)
            .with_source(CountingSource { loads: Arc::clone(&loads) });

        assert!(merger.resolve().await.is_err());
        assert_eq!(loads.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_debug_lists_source_names() {
        let merger = PropertyLayerMerger::default()
            .with_source(MemorySource::with_properties("base", [("a", "1")]))
            .with_source(MemorySource::with_properties("override", [("a", "2")]));
        assert_eq!(format!("{:?}", merger), r#"PropertyLayerMerger { sources: ["base", "override"] }"#);
    }
}
