//! Default five-layer property loading
//!
//! Layers, later overriding earlier:
//! 1. `application.properties` from the resource directory
//! 2. the parameter store, if the `SSM_PREFIX` variable is set
//! 3. `overrides.properties` from the working directory
//! 4. `application-test.properties` from the resource directory
//! 5. `overrides-test.properties` from the working directory
//!
//! Every layer is optional.

use std::path::PathBuf;
use std::sync::Arc;

use super::{PrefixResolver, PropertyLayerMerger};
use crate::config::{process_env, EnvLookup, FileSource, RemoteBackend, RemoteSource, SharedSource, DEFAULT_PREFIX_VARIABLE};
use crate::error::LoadResult;
use crate::types::PropertyMap;

/// File names and variable used by the default loader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Directory holding bundled resource files
    pub resource_dir: PathBuf,
    /// Base file, relative to `resource_dir`
    pub base_file: PathBuf,
    /// Override file, relative to the working directory
    pub override_file: PathBuf,
    /// Test base file, relative to `resource_dir`
    pub test_base_file: PathBuf,
    /// Test override file, relative to the working directory
    pub test_override_file: PathBuf,
    /// Variable whose value is the parameter store prefix
    pub prefix_variable: String,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            resource_dir: PathBuf::from("resources"),
            base_file: PathBuf::from("application.properties"),
            override_file: PathBuf::from("overrides.properties"),
            test_base_file: PathBuf::from("application-test.properties"),
            test_override_file: PathBuf::from("overrides-test.properties"),
            prefix_variable: DEFAULT_PREFIX_VARIABLE.to_string(),
        }
    }
}

impl LoaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resource_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resource_dir = dir.into();
        self
    }

    pub fn with_base_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.base_file = file.into();
        self
    }

    pub fn with_override_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.override_file = file.into();
        self
    }

    pub fn with_test_base_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.test_base_file = file.into();
        self
    }

    pub fn with_test_override_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.test_override_file = file.into();
        self
    }

    pub fn with_prefix_variable(mut self, variable: impl Into<String>) -> Self {
        self.prefix_variable = variable.into();
        self
    }
}

/// Builds the default source stack and resolves it
///
/// The environment lookup and the remote backend can be replaced, which is
/// how tests run the full stack without touching the process environment or
/// AWS.
///
/// # Example
///
/// ```no_run
/// use propstack_core::resolver::{LoaderOptions, PropertiesLoader};
/// use propstack_core::accessors::Properties;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let properties = PropertiesLoader::new(LoaderOptions::default()).load().await?;
/// let port = properties.int_required("server.port")?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct PropertiesLoader {
    options: LoaderOptions,
    env: EnvLookup,
    backend: RemoteBackend,
}

impl PropertiesLoader {
    pub fn new(options: LoaderOptions) -> Self {
        Self {
            options,
            env: process_env(),
            backend: RemoteBackend::default(),
        }
    }

    /// Replace the variable lookup (useful for testing)
    pub fn with_env(mut self, env: EnvLookup) -> Self {
        self.env = env;
        self
    }

    pub fn with_backend(mut self, backend: RemoteBackend) -> Self {
        self.backend = backend;
        self
    }

    pub fn with_resolver(self, resolver: Arc<PrefixResolver>) -> Self {
        self.with_backend(RemoteBackend::Resolver(resolver))
    }

    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// The five layers in precedence order, lowest first
    pub fn sources(&self) -> Vec<SharedSource> {
        let options = &self.options;
        let remote = RemoteSource::new(options.prefix_variable.clone())
            .with_env(Arc::clone(&self.env))
            .with_backend(self.backend.clone());

        vec![
            Arc::new(FileSource::resource(&options.resource_dir, &options.base_file)),
            Arc::new(remote),
            Arc::new(FileSource::working_dir(&options.override_file)),
            Arc::new(FileSource::resource(&options.resource_dir, &options.test_base_file)),
            Arc::new(FileSource::working_dir(&options.test_override_file)),
        ]
    }

    pub fn merger(&self) -> PropertyLayerMerger {
        PropertyLayerMerger::new(self.sources())
    }

    /// Resolve all layers into one snapshot
    pub async fn load(&self) -> LoadResult<PropertyMap> {
        self.merger().resolve().await
    }
}

impl std::fmt::Debug for PropertiesLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropertiesLoader")
            .field("options", &self.options)
            .field("backend", &self.backend)
            .finish()
    }
}

/// Load properties with the default layers, process environment and AWS backend
pub async fn load_properties() -> LoadResult<PropertyMap> {
    PropertiesLoader::new(LoaderOptions::default()).load().await
}
