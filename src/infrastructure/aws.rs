use crate::config::GatewayConfig;
use crate::services::queue::SqsQueueService;
use crate::services::secrets::SecretsManagerService;
use crate::services::storage::S3StorageService;
use aws_config::{BehaviorVersion, Region, SdkConfig};
use std::sync::Arc;
use tracing::info;

/// Clients for the three AWS services, built once and shared by every request.
pub struct AwsClients {
    pub storage: Arc<S3StorageService>,
    pub queue: Arc<SqsQueueService>,
    pub secrets: Arc<SecretsManagerService>,
}

pub async fn load_sdk_config(config: &GatewayConfig) -> SdkConfig {
    let mut loader =
        aws_config::defaults(BehaviorVersion::latest()).region(Region::new(config.aws_region.clone()));

    if let Some(endpoint_url) = &config.endpoint_url {
        info!("☁️  Using AWS endpoint override: {}", endpoint_url);
        loader = loader.endpoint_url(endpoint_url);
    }

    loader.load().await
}

pub async fn setup_clients(config: &GatewayConfig) -> AwsClients {
    let sdk_config = load_sdk_config(config).await;

    // Emulators (LocalStack, MinIO) only serve path-style bucket addressing.
    let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
        .force_path_style(config.endpoint_url.is_some())
        .build();

    let s3_client = aws_sdk_s3::Client::from_conf(s3_config);
    let sqs_client = aws_sdk_sqs::Client::new(&sdk_config);
    let secrets_client = aws_sdk_secretsmanager::Client::new(&sdk_config);

    info!("🪣 S3 bucket: {}", config.bucket_name);
    info!("📬 SQS queue: {}", config.queue_url);
    info!("🔐 Secret: {}", config.secret_name);

    AwsClients {
        storage: Arc::new(S3StorageService::new(s3_client, config.bucket_name.clone())),
        queue: Arc::new(SqsQueueService::new(sqs_client, config.queue_url.clone())),
        secrets: Arc::new(SecretsManagerService::new(
            secrets_client,
            config.secret_name.clone(),
        )),
    }
}
