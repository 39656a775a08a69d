//! AWS Secrets Manager secret resolver

use async_trait::async_trait;
use aws_sdk_secretsmanager::error::SdkError;
use aws_sdk_secretsmanager::operation::get_secret_value::{GetSecretValueError, GetSecretValueOutput};
use aws_sdk_secretsmanager::Client as SecretsManagerClient;

use super::traits::{SecretError, SecretResolver, SecretResult};

/// Resolves secret identifiers (names or ARNs) through AWS Secrets Manager
///
/// Only the `SecretString` of the current version is used. Binary secrets are
/// rejected as an invalid request.
#[derive(Debug, Clone)]
pub struct SecretsManagerResolver {
    client: SecretsManagerClient,
}

impl SecretsManagerResolver {
    pub fn new(client: SecretsManagerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SecretResolver for SecretsManagerResolver {
    fn name(&self) -> &str {
        "secretsmanager"
    }

    async fn resolve(&self, secret_id: &str) -> SecretResult<String> {
        tracing::debug!(secret_id, "Loading secret");

        let output = self
            .client
            .get_secret_value()
            .secret_id(secret_id)
            .send()
            .await
            .map_err(|err| map_sdk_error(secret_id, err))?;

        secret_text(secret_id, output)
    }
}

/// The string payload of a secret; binary-only secrets are rejected
fn secret_text(secret_id: &str, output: GetSecretValueOutput) -> SecretResult<String> {
    output.secret_string.ok_or_else(|| {
        SecretError::invalid_request(secret_id, "The secret has no string value (binary secrets are not supported).", None)
    })
}

/// Map a `GetSecretValue` failure onto the secret error taxonomy
fn map_sdk_error<R>(secret_id: &str, err: SdkError<GetSecretValueError, R>) -> SecretError
where
    R: std::fmt::Debug + Send + Sync + 'static,
{
    let fault = match &err {
        SdkError::ServiceError(service_err) => match service_err.err() {
            GetSecretValueError::ResourceNotFoundException(_) => {
                Fault::NotFound("We can't find the resource that you asked for.")
            }
            GetSecretValueError::InvalidParameterException(_) => {
                Fault::InvalidRequest("You provided an invalid value for a parameter.")
            }
            GetSecretValueError::InvalidRequestException(_) => Fault::InvalidRequest(
                "You provided a parameter value that is not valid for the current state of the resource \
                 (the secret may be marked deleted, or rotation is enabled without a rotation function).",
            ),
            GetSecretValueError::DecryptionFailure(_) => {
                Fault::Decryption("Secrets Manager can't decrypt the protected secret text using the provided KMS key.")
            }
            GetSecretValueError::InternalServiceError(_) => Fault::Internal("An error occurred on the server side."),
            _ => Fault::Internal("Secrets Manager returned an unexpected error."),
        },
        SdkError::ConstructionFailure(_) => Fault::InvalidRequest("The secret request could not be constructed."),
        _ => Fault::Internal("Secrets Manager could not be reached."),
    };

    let cause = Some(Box::new(err) as crate::error::BoxError);
    match fault {
        Fault::NotFound(message) => SecretError::not_found(secret_id, message, cause),
        Fault::InvalidRequest(message) => SecretError::invalid_request(secret_id, message, cause),
        Fault::Decryption(message) => SecretError::decryption_failure(secret_id, message, cause),
        Fault::Internal(message) => SecretError::internal_error(secret_id, message, cause),
    }
}

enum Fault {
    NotFound(&'static str),
    InvalidRequest(&'static str),
    Decryption(&'static str),
    Internal(&'static str),
}
