//! Remote parameter store property source
//!
//! The remote layer is switched on by a trigger variable (`SSM_PREFIX` by
//! default). Its value is the parameter store prefix to resolve. When the
//! variable is unset the layer is skipped.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use super::traits::PropertySource;
use crate::error::{LoadError, LoadResult};
use crate::resolver::PrefixResolver;
use crate::types::PropertyMap;

/// Default name of the trigger variable
pub const DEFAULT_PREFIX_VARIABLE: &str = "SSM_PREFIX";

/// Looks up an environment-style variable by name
pub type EnvLookup = Arc<dyn Fn(&str) -> Option<String> + Send + Sync>;

/// Variable lookup against the process environment
pub fn process_env() -> EnvLookup {
    Arc::new(|name: &str| std::env::var(name).ok())
}

/// What resolves the prefix once the trigger variable is present
#[derive(Clone)]
pub enum RemoteBackend {
    /// An explicitly constructed resolver
    Resolver(Arc<PrefixResolver>),
    /// Parameter Store + Secrets Manager, clients built on first use
    #[cfg(feature = "aws")]
    Aws(crate::aws::AwsClientBuilder),
    /// No backend; a present trigger variable is an error
    Unconfigured,
}

impl Default for RemoteBackend {
    #[cfg(feature = "aws")]
    fn default() -> Self {
        RemoteBackend::Aws(crate::aws::AwsClientBuilder::new())
    }

    #[cfg(not(feature = "aws"))]
    fn default() -> Self {
        RemoteBackend::Unconfigured
    }
}

impl fmt::Debug for RemoteBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RemoteBackend::Resolver(resolver) => f.debug_tuple("Resolver").field(resolver).finish(),
            #[cfg(feature = "aws")]
            RemoteBackend::Aws(builder) => f.debug_tuple("Aws").field(builder).finish(),
            RemoteBackend::Unconfigured => f.write_str("Unconfigured"),
        }
    }
}

/// Parameter store prefix named by a trigger variable
pub struct RemoteSource {
    name: String,
    variable: String,
    env: EnvLookup,
    backend: RemoteBackend,
}

impl RemoteSource {
    /// Create a source reading `variable` from the process environment
    pub fn new(variable: impl Into<String>) -> Self {
        let variable = variable.into();
        Self {
            name: format!("remote:{}", variable),
            variable,
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

    pub fn variable(&self) -> &str {
        &self.variable
    }

    async fn resolver(&self) -> LoadResult<Arc<PrefixResolver>> {
        match &self.backend {
            RemoteBackend::Resolver(resolver) => Ok(Arc::clone(resolver)),
            #[cfg(feature = "aws")]
            RemoteBackend::Aws(builder) => Ok(Arc::new(PrefixResolver::from_aws(builder).await)),
            RemoteBackend::Unconfigured => Err(LoadError::NoRemoteBackend {
                variable: self.variable.clone(),
            }),
        }
    }
}

#[async_trait]
impl PropertySource for RemoteSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load(&self) -> LoadResult<PropertyMap> {
        let Some(prefix) = (self.env)(&self.variable) else {
            tracing::info!(
                variable = %self.variable,
                "Trigger variable not found, no properties loaded from the parameter store"
            );
            return Ok(PropertyMap::new());
        };

        let properties = self.resolver().await?.resolve_for_prefix(&prefix).await?;

        tracing::info!(
            prefix = %prefix,
            count = properties.len(),
            keys = ?properties.keys(),
            "Loaded properties from the parameter store"
        );
        Ok(properties)
    }
}

impl fmt::Debug for RemoteSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteSource")
            .field("variable", &self.variable)
            .field("backend", &self.backend)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::MemoryNamespaceFetcher;
    use crate::secrets::MemorySecretResolver;

    fn env_with(name: &'static str, value: &'static str) -> EnvLookup {
        Arc::new(move |key: &str| (key == name).then(|| value.to_string()))
    }

    fn no_env() -> EnvLookup {
        Arc::new(|_: &str| None)
    }

    fn memory_resolver() -> Arc<PrefixResolver> {
        let params = MemoryNamespaceFetcher::with_parameters([
            ("/construct/current/config/hacker.name", "Henrik"),
            ("/construct/current/secrets/hacker.login", "arn:login"),
        ]);
        let secrets = MemorySecretResolver::with_secrets([("arn:login", r#"{"password":"swordfish"}"#)]);
        Arc::new(PrefixResolver::new(Arc::new(params), Arc::new(secrets)))
    }

    #[tokio::test]
    async fn test_unset_variable_contributes_nothing() {
        let source = RemoteSource::new(DEFAULT_PREFIX_VARIABLE)
            .with_env(no_env())
            .with_backend(RemoteBackend::Unconfigured);

        assert!(source.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_variable_supplies_prefix() {
        let source = RemoteSource::new(DEFAULT_PREFIX_VARIABLE)
            .with_env(env_with("SSM_PREFIX", "/construct/current"))
            .with_resolver(memory_resolver());

        let properties = source.load().await.unwrap();

        assert_eq!(properties.get("hacker.name"), Some("Henrik"));
        assert_eq!(properties.get("hacker.login.password"), Some("swordfish"));
    }

    #[tokio::test]
    async fn test_custom_variable_name() {
        let source = RemoteSource::new("APP_PARAMETER_PREFIX")
            .with_env(env_with("SSM_PREFIX", "/construct/current"))
            .with_resolver(memory_resolver());

        // only the configured variable is consulted
        assert!(source.load().await.unwrap().is_empty());
        assert_eq!(source.variable(), "APP_PARAMETER_PREFIX");
        assert_eq!(source.name(), "remote:APP_PARAMETER_PREFIX");
    }

    #[tokio::test]
    async fn test_present_variable_without_backend_is_an_error() {
        let source = RemoteSource::new(DEFAULT_PREFIX_VARIABLE)
            .with_env(env_with("SSM_PREFIX", "/construct/current"))
            .with_backend(RemoteBackend::Unconfigured);

        let err = source.load().await.unwrap_err();
        assert!(matches!(err, LoadError::NoRemoteBackend { .. }));
    }

    #[tokio::test]
    async fn test_empty_variable_is_an_invalid_prefix() {
        let source = RemoteSource::new(DEFAULT_PREFIX_VARIABLE)
            .with_env(env_with("SSM_PREFIX", ""))
            .with_resolver(memory_resolver());

        let err = source.load().await.unwrap_err();
        assert!(matches!(err, LoadError::InvalidPrefix(_)));
    }
}
