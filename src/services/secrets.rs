use anyhow::{Result, anyhow};
use async_trait::async_trait;
use aws_sdk_secretsmanager::Client;
use aws_sdk_secretsmanager::error::DisplayErrorContext;

/// Field of the secret JSON document exposed by the gateway.
pub const API_KEY_FIELD: &str = "API_KEY";

#[async_trait]
pub trait SecretService: Send + Sync {
    fn secret_name(&self) -> &str;

    /// Raw `SecretString` of the configured secret.
    async fn get_secret_string(&self) -> Result<String>;
}

pub struct SecretsManagerService {
    client: Client,
    secret_name: String,
}

impl SecretsManagerService {
    pub fn new(client: Client, secret_name: String) -> Self {
        Self {
            client,
            secret_name,
        }
    }
}

#[async_trait]
impl SecretService for SecretsManagerService {
    fn secret_name(&self) -> &str {
        &self.secret_name
    }

    async fn get_secret_string(&self) -> Result<String> {
        let output = self
            .client
            .get_secret_value()
            .secret_id(&self.secret_name)
            .send()
            .await
            .map_err(|e| anyhow!("{}", DisplayErrorContext(&e)))?;

        output
            .secret_string
            .ok_or_else(|| anyhow!("Secret {} has no SecretString", self.secret_name))
    }
}

/// Extract the API key from a secret JSON document.
pub fn extract_api_key(secret: &str) -> Result<serde_json::Value> {
    let mut document: serde_json::Value = serde_json::from_str(secret)?;
    document
        .get_mut(API_KEY_FIELD)
        .map(serde_json::Value::take)
        .ok_or_else(|| anyhow!("'{}'", API_KEY_FIELD))
}
