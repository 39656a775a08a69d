//! File-backed property source (`.properties`)
//!
//! Files are looked up either relative to the working directory or inside a
//! resource directory shipped with the application.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::properties_format;
use super::traits::PropertySource;
use crate::error::{LoadError, LoadResult};
use crate::types::PropertyMap;

/// Where a properties file is looked up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileLocation {
    /// Relative to the process working directory
    WorkingDirectory,
    /// Inside the application's resource directory
    Resource,
}

impl FileLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileLocation::WorkingDirectory => "working directory",
            FileLocation::Resource => "resources",
        }
    }
}

/// Optional `.properties` file
///
/// A missing file contributes nothing. A file that exists but cannot be read
/// fails the resolution pass.
///
/// # Example
///
/// ```no_run
/// use propstack_core::config::FileSource;
///
/// let bundled = FileSource::resource("resources", "application.properties");
/// let overrides = FileSource::working_dir("overrides.properties");
/// ```
#[derive(Debug, Clone)]
pub struct FileSource {
    name: String,
    path: PathBuf,
    location: FileLocation,
}

impl FileSource {
    /// Create a file source for an explicit path
    pub fn new(path: impl Into<PathBuf>, location: FileLocation) -> Self {
        let path = path.into();
        Self {
            name: format!("file:{}", path.display()),
            path,
            location,
        }
    }

    /// A file relative to the working directory
    pub fn working_dir(file_name: impl AsRef<Path>) -> Self {
        Self::new(file_name.as_ref(), FileLocation::WorkingDirectory)
    }

    /// A file inside a resource directory
    pub fn resource(resource_dir: impl AsRef<Path>, file_name: impl AsRef<Path>) -> Self {
        Self::new(resource_dir.as_ref().join(file_name), FileLocation::Resource)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn location(&self) -> FileLocation {
        self.location
    }

    /// Read and parse the file; `None` when it does not exist
    fn read(&self) -> LoadResult<Option<PropertyMap>> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(LoadError::File {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        Ok(Some(properties_format::parse(&String::from_utf8_lossy(&bytes))))
    }
}

#[async_trait]
impl PropertySource for FileSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> LoadResult<PropertyMap> {
        match self.read()? {
            Some(properties) => {
                tracing::info!(
                    file = %self.path.display(),
                    location = self.location.as_str(),
                    count = properties.len(),
                    keys = ?properties.keys(),
                    "Loaded properties from file"
                );
                Ok(properties)
            }
            None => {
                tracing::info!(
                    file = %self.path.display(),
                    location = self.location.as_str(),
                    "Properties file not found, no properties loaded"
                );
                Ok(PropertyMap::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let source = FileSource::working_dir(dir.path().join("overrides.properties"));

        let properties = source.load().await.unwrap();

        assert!(properties.is_empty());
    }

    #[tokio::test]
    async fn test_resource_file_is_loaded() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("application.properties"), "hacker.name=Agent\nhacker.age=42\n").unwrap();

        let source = FileSource::resource(dir.path(), "application.properties");
        let properties = source.load().await.unwrap();

        assert_eq!(source.location(), FileLocation::Resource);
        assert_eq!(properties.len(), 2);
        assert_eq!(properties.get("hacker.name"), Some("Agent"));
    }

    #[tokio::test]
    async fn test_invalid_file_is_tolerated() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("invalid.properties"), "hacker.name\\\nAgent Smith\n").unwrap();

        let properties = FileSource::resource(dir.path(), "invalid.properties").load().await.unwrap();

        assert_eq!(properties.get("hacker.nameAgent"), Some("Smith"));
    }

    #[tokio::test]
    async fn test_non_utf8_bytes_are_replaced() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("latin1.properties"), b"name=caf\xe9\n").unwrap();

        let properties = FileSource::resource(dir.path(), "latin1.properties").load().await.unwrap();

        assert_eq!(properties.get("name"), Some("caf\u{FFFD}"));
    }

    #[tokio::test]
    async fn test_unreadable_path_is_an_error() {
        let dir = tempdir().unwrap();
        // a directory exists but cannot be read as a file
        fs::create_dir(dir.path().join("application.properties")).unwrap();

        let err = FileSource::resource(dir.path(), "application.properties").load().await.unwrap_err();

        assert!(matches!(err, LoadError::File { .. }));
    }

    #[test]
    fn test_source_name() {
        let source = FileSource::working_dir("overrides.properties");
        assert_eq!(source.name(), "file:overrides.properties");
        assert_eq!(source.location(), FileLocation::WorkingDirectory);
    }
}
