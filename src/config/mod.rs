use std::env;
use thiserror::Error;

pub const DEFAULT_REGION: &str = "ap-south-1";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 64 * 1024 * 1024;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{name} has an invalid value: {value}")]
    Invalid { name: &'static str, value: String },
}

/// Deployment parameters for the cloud gateway service
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// AWS region used for every client (default: "ap-south-1")
    pub aws_region: String,

    /// Target bucket for uploads
    pub bucket_name: String,

    /// Queue URL used for send/receive
    pub queue_url: String,

    /// Name or ARN of the secret holding the API key
    pub secret_name: String,

    /// Optional endpoint override (LocalStack, MinIO)
    pub endpoint_url: Option<String>,

    /// Listen port (default: 5000)
    pub port: u16,

    /// Maximum accepted request body for uploads in bytes (default: 64 MB)
    pub max_upload_size: usize,
}

impl GatewayConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. Required keys are
    /// checked here so a misconfigured deployment fails at startup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| non_empty(key).ok_or(ConfigError::Missing(key));

        Ok(Self {
            aws_region: non_empty("AWS_DEFAULT_REGION")
                .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            bucket_name: required("BUCKET_NAME")?,
            queue_url: required("QUEUE_URL")?,
            secret_name: required("SECRET_NAME")?,
            endpoint_url: non_empty("AWS_ENDPOINT_URL"),
            port: parse_or("PORT", non_empty("PORT"), DEFAULT_PORT)?,
            max_upload_size: parse_or(
                "MAX_UPLOAD_SIZE",
                non_empty("MAX_UPLOAD_SIZE"),
                DEFAULT_MAX_UPLOAD_SIZE,
            )?,
        })
    }
}

/// Configuration for the Kubernetes demo service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoConfig {
    pub port: u16,
}

impl DemoConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            port: parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    raw: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const REQUIRED: &[(&str, &str)] = &[
        ("BUCKET_NAME", "uploads"),
        ("QUEUE_URL", "https://sqs.ap-south-1.amazonaws.com/123/jobs"),
        ("SECRET_NAME", "app/api"),
    ];

    #[test]
    fn test_defaults_applied() {
        let config = GatewayConfig::from_lookup(lookup_from(REQUIRED)).unwrap();
        assert_eq!(config.aws_region, "ap-south-1");
        assert_eq!(config.port, 5000);
        assert_eq!(config.max_upload_size, 64 * 1024 * 1024);
        assert!(config.endpoint_url.is_none());
        assert_eq!(config.bucket_name, "uploads");
    }

    #[test]
    fn test_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("AWS_DEFAULT_REGION", "eu-west-1"));
        pairs.push(("PORT", "8080"));
        pairs.push(("AWS_ENDPOINT_URL", "http://localhost:4566"));
        let config = GatewayConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(config.aws_region, "eu-west-1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.endpoint_url.as_deref(), Some("http://localhost:4566"));
    }

    #[test]
    fn test_missing_bucket_rejected() {
        let err = GatewayConfig::from_lookup(lookup_from(&[
            ("QUEUE_URL", "q"),
            ("SECRET_NAME", "s"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("BUCKET_NAME"));
    }

    #[test]
    fn test_blank_value_counts_as_missing() {
        let mut pairs = REQUIRED.to_vec();
        pairs.retain(|(k, _)| *k != "SECRET_NAME");
        pairs.push(("SECRET_NAME", "  "));
        let err = GatewayConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert_eq!(err, ConfigError::Missing("SECRET_NAME"));
    }

    #[test]
    fn test_invalid_port() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push(("PORT", "http"));
        let err = GatewayConfig::from_lookup(lookup_from(&pairs)).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));
    }

    #[test]
    fn test_demo_config() {
        assert_eq!(DemoConfig::from_lookup(lookup_from(&[])).unwrap().port, 5000);
        assert_eq!(
            DemoConfig::from_lookup(lookup_from(&[("PORT", "9090")]))
                .unwrap()
                .port,
            9090
        );
    }
}
