//! AWS Systems Manager Parameter Store fetcher

use async_trait::async_trait;
use aws_sdk_ssm::error::{ProvideErrorMetadata, SdkError};
use aws_sdk_ssm::operation::get_parameters_by_path::GetParametersByPathError;
use aws_sdk_ssm::Client as SsmClient;

use super::traits::{NamespaceError, NamespaceFetcher, NamespaceResult};
use crate::types::PropertyMap;

/// Lists a Parameter Store path with `GetParametersByPath`
///
/// Requests are recursive and decrypt `SecureString` parameters. All pages are
/// drained before the map is returned.
#[derive(Debug, Clone)]
pub struct SsmNamespaceFetcher {
    client: SsmClient,
}

impl SsmNamespaceFetcher {
    pub fn new(client: SsmClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NamespaceFetcher for SsmNamespaceFetcher {
    fn name(&self) -> &str {
        "ssm"
    }

    async fn fetch(&self, prefix: &str) -> NamespaceResult<PropertyMap> {
        tracing::debug!(path = prefix, "Loading parameters at path");

        let mut pages = self
            .client
            .get_parameters_by_path()
            .path(prefix)
            .with_decryption(true)
            .recursive(true)
            .into_paginator()
            .send();

        let mut parameters = PropertyMap::new();
        while let Some(page) = pages.next().await {
            let page = page.map_err(|err| map_sdk_error(prefix, err))?;
            for parameter in page.parameters.unwrap_or_default() {
                if let (Some(name), Some(value)) = (parameter.name, parameter.value) {
                    parameters.insert(name, value);
                }
            }
        }

        Ok(parameters)
    }
}

/// Map a `GetParametersByPath` failure onto the namespace error taxonomy
fn map_sdk_error<R>(path: &str, err: SdkError<GetParametersByPathError, R>) -> NamespaceError
where
    R: std::fmt::Debug + Send + Sync + 'static,
{
    let fault = match &err {
        SdkError::ServiceError(service_err) => {
            let error = service_err.err();
            match error {
                GetParametersByPathError::InternalServerError(_) => {
                    Fault::Server("An error occurred on the server side.")
                }
                GetParametersByPathError::InvalidKeyId(_) => Fault::Invalid("The query key ID is not valid."),
                GetParametersByPathError::InvalidFilterKey(_)
                | GetParametersByPathError::InvalidFilterOption(_)
                | GetParametersByPathError::InvalidFilterValue(_)
                | GetParametersByPathError::InvalidNextToken(_) => {
                    Fault::Invalid("The parameter request was rejected as invalid.")
                }
                _ => match error.code() {
                    Some("ParameterNotFound") => {
                        Fault::NotFound("The parameter could not be found. Verify the name and try again.")
                    }
                    Some("ParameterVersionNotFound") => Fault::NotFound(
                        "The specified parameter version was not found. Verify the parameter name and version, and try again.",
                    ),
                    _ => Fault::Server("Parameter Store returned an unexpected error."),
                },
            }
        }
        SdkError::ConstructionFailure(_) => Fault::Invalid("The parameter request could not be constructed."),
        _ => Fault::Server("Parameter Store could not be reached."),
    };

    let cause = Some(Box::new(err) as crate::error::BoxError);
    match fault {
        Fault::Server(message) => NamespaceError::server_error(path, message, cause),
        Fault::Invalid(message) => NamespaceError::invalid_parameter(path, message, cause),
        Fault::NotFound(message) => NamespaceError::not_found(path, message, cause),
    }
}

enum Fault {
    Server(&'static str),
    Invalid(&'static str),
    NotFound(&'static str),
}
