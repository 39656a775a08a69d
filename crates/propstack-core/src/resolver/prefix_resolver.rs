//! Resolution of one parameter store prefix
//!
//! A prefix `P` owns two sub-namespaces:
//! - `P/config/`: plain properties, copied verbatim
//! - `P/secrets/`: secret references whose value is a secret identifier
//!
//! Keys are made relative by stripping the sub-namespace path. Secret payloads
//! are flattened under the relative key. Secrets are applied after config, so
//! a secret-derived property replaces a plain one with the same key.

use std::sync::Arc;

use futures::future::try_join_all;

use crate::error::{LoadError, LoadResult};
use crate::params::NamespaceFetcher;
use crate::secrets::{flatten, SecretResolver};
use crate::types::PropertyMap;

/// Resolves a parameter store prefix into flat properties
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use propstack_core::params::MemoryNamespaceFetcher;
/// use propstack_core::secrets::MemorySecretResolver;
/// use propstack_core::resolver::PrefixResolver;
///
/// # futures::executor::block_on(async {
/// let params = MemoryNamespaceFetcher::with_parameters([
///     ("/app/config/db.host", "db.internal"),
///     ("/app/secrets/db", "arn:db"),
/// ]);
/// let secrets = MemorySecretResolver::with_secrets([("arn:db", r#"{"password":"hunter2"}"#)]);
///
/// let resolver = PrefixResolver::new(Arc::new(params), Arc::new(secrets));
/// let properties = resolver.resolve_for_prefix("/app").await.unwrap();
///
/// assert_eq!(properties.get("db.host"), Some("db.internal"));
/// assert_eq!(properties.get("db.password"), Some("hunter2"));
/// # });
/// ```
#[derive(Clone)]
pub struct PrefixResolver {
    parameters: Arc<dyn NamespaceFetcher>,
    secrets: Arc<dyn SecretResolver>,
}

impl PrefixResolver {
    pub fn new(parameters: Arc<dyn NamespaceFetcher>, secrets: Arc<dyn SecretResolver>) -> Self {
        Self { parameters, secrets }
    }

    /// Build a resolver backed by Parameter Store and Secrets Manager
    #[cfg(feature = "aws")]
    pub async fn from_aws(builder: &crate::aws::AwsClientBuilder) -> Self {
        use crate::params::SsmNamespaceFetcher;
        use crate::secrets::SecretsManagerResolver;

        let sdk_config = builder.build_sdk_config().await;
        Self::new(
            Arc::new(SsmNamespaceFetcher::new(builder.ssm_client(&sdk_config))),
            Arc::new(SecretsManagerResolver::new(builder.secrets_manager_client(&sdk_config))),
        )
    }

    /// Resolve the `config` and `secrets` sub-namespaces of `prefix`
    ///
    /// Any collaborator or flattening failure aborts the whole prefix.
    pub async fn resolve_for_prefix(&self, prefix: &str) -> LoadResult<PropertyMap> {
        if prefix.is_empty() {
            return Err(LoadError::InvalidPrefix(prefix.to_string()));
        }

        let mut properties = self.parameters_by_path(prefix).await?;
        let secrets = self.secrets_by_path(prefix).await?;

        tracing::debug!(
            prefix,
            parameters = properties.len(),
            secrets = secrets.len(),
            "Resolved parameter store prefix"
        );

        properties.merge_from(secrets);
        Ok(properties)
    }

    async fn parameters_by_path(&self, prefix: &str) -> LoadResult<PropertyMap> {
        let path = format!("{}/config/", prefix);
        let parameters = self.parameters.fetch(&path).await?;

        Ok(parameters
            .into_iter()
            .map(|(key, value)| (relative_key(&key, &path), value))
            .collect())
    }

    async fn secrets_by_path(&self, prefix: &str) -> LoadResult<PropertyMap> {
        let path = format!("{}/secrets/", prefix);
        let references = self.parameters.fetch(&path).await?;

        let path = path.as_str();
        let payloads = try_join_all(references.iter().map(|(key, secret_id)| async move {
            let payload = self.secrets.resolve(secret_id).await?;
            Ok::<_, LoadError>((relative_key(key, path), payload))
        }))
        .await?;

        let mut secrets = PropertyMap::new();
        for (base_key, payload) in payloads {
            secrets.extend(flatten(&payload, &base_key)?);
        }
        Ok(secrets)
    }
}

impl std::fmt::Debug for PrefixResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrefixResolver")
            .field("parameters", &self.parameters.name())
            .field("secrets", &self.secrets.name())
            .finish()
    }
}

/// Strip the namespace path from a full key; keys outside it are kept as-is
fn relative_key(key: &str, path: &str) -> String {
    key.strip_prefix(path).unwrap_or(key).to_string()
}
