//! AWS SDK configuration
//!
//! Builds the Parameter Store and Secrets Manager clients used by the remote
//! layer, with optional region and endpoint overrides for LocalStack.

use aws_config::{meta::region::RegionProviderChain, BehaviorVersion, Region, SdkConfig};
use aws_sdk_secretsmanager::Client as SecretsManagerClient;
use aws_sdk_ssm::Client as SsmClient;

/// AWS client builder
///
/// Without overrides the region and credentials come from the default AWS
/// provider chains (environment, profile, instance metadata).
#[derive(Debug, Clone, Default)]
pub struct AwsClientBuilder {
    region: Option<String>,
    ssm_endpoint_url: Option<String>,
    secrets_manager_endpoint_url: Option<String>,
}

impl AwsClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use this region before falling back to the default region chain
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_ssm_endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.ssm_endpoint_url = Some(url.into());
        self
    }

    pub fn with_secrets_manager_endpoint_url(mut self, url: impl Into<String>) -> Self {
        self.secrets_manager_endpoint_url = Some(url.into());
        self
    }

    /// Load the shared SDK configuration
    pub async fn build_sdk_config(&self) -> SdkConfig {
        let region_provider = RegionProviderChain::first_try(self.region.clone().map(Region::new)).or_default_provider();

        aws_config::defaults(BehaviorVersion::latest())
            .region(region_provider)
            .load()
            .await
    }

    /// Create a Parameter Store client with optional custom endpoint
    pub fn ssm_client(&self, sdk_config: &SdkConfig) -> SsmClient {
        match &self.ssm_endpoint_url {
            Some(endpoint_url) => {
                tracing::info!(endpoint = %endpoint_url, "Using custom Parameter Store endpoint");
                let config = aws_sdk_ssm::config::Builder::from(sdk_config)
                    .endpoint_url(endpoint_url)
                    .build();
                SsmClient::from_conf(config)
            }
            None => SsmClient::new(sdk_config),
        }
    }

    /// Create a Secrets Manager client with optional custom endpoint
    pub fn secrets_manager_client(&self, sdk_config: &SdkConfig) -> SecretsManagerClient {
        match &self.secrets_manager_endpoint_url {
            Some(endpoint_url) => {
                tracing::info!(endpoint = %endpoint_url, "Using custom Secrets Manager endpoint");
                let config = aws_sdk_secretsmanager::config::Builder::from(sdk_config)
                    .endpoint_url(endpoint_url)
                    .build();
                SecretsManagerClient::from_conf(config)
            }
            None => SecretsManagerClient::new(sdk_config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_sdk_config_with_region() {
        let builder = AwsClientBuilder::new().with_region("eu-north-1");
        let config = builder.build_sdk_config().await;
        assert_eq!(config.region().map(|r| r.as_ref()), Some("eu-north-1"));
    }

    #[tokio::test]
    async fn test_clients_with_custom_endpoints_keep_region() {
        let builder = AwsClientBuilder::new()
            .with_region("us-east-1")
            .with_ssm_endpoint_url("http://localhost:4566")
            .with_secrets_manager_endpoint_url("http://localhost:4566");
        let config = builder.build_sdk_config().await;

        let ssm = builder.ssm_client(&config);
        let secrets = builder.secrets_manager_client(&config);

        // endpoint overrides keep the shared settings
        assert_eq!(ssm.config().region().map(|r| r.as_ref()), Some("us-east-1"));
        assert_eq!(secrets.config().region().map(|r| r.as_ref()), Some("us-east-1"));
    }
}
