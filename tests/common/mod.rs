#![allow(dead_code)]

use anyhow::anyhow;
use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use bytes::Bytes;
use cloud_gateway::config::GatewayConfig;
use cloud_gateway::services::queue::{QueueService, ReceivedMessage};
use cloud_gateway::services::secrets::SecretService;
use cloud_gateway::services::storage::StorageService;
use cloud_gateway::{AppState, create_app};
use http_body_util::BodyExt;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

pub const BUCKET: &str = "test-bucket";
pub const QUEUE_URL: &str = "https://sqs.ap-south-1.amazonaws.com/000000000000/test-queue";
pub const SECRET_NAME: &str = "test/secret";

pub fn test_config() -> GatewayConfig {
    GatewayConfig::from_lookup(|key| match key {
        "BUCKET_NAME" => Some(BUCKET.to_string()),
        "QUEUE_URL" => Some(QUEUE_URL.to_string()),
        "SECRET_NAME" => Some(SECRET_NAME.to_string()),
        _ => None,
    })
    .unwrap()
}

#[derive(Default)]
pub struct MockStorageService {
    pub files: Mutex<HashMap<String, Bytes>>,
    pub fail_with: Option<String>,
}

#[async_trait]
impl StorageService for MockStorageService {
    fn bucket(&self) -> &str {
        BUCKET
    }

    async fn upload_file(&self, key: &str, data: Bytes) -> anyhow::Result<()> {
        if let Some(msg) = &self.fail_with {
            return Err(anyhow!(msg.clone()));
        }
        self.files.lock().unwrap().insert(key.to_string(), data);
        Ok(())
    }
}

#[derive(Default)]
pub struct MockQueueService {
    pub messages: Mutex<VecDeque<ReceivedMessage>>,
    pub next_id: AtomicUsize,
    pub fail_with: Option<String>,
}

#[async_trait]
impl QueueService for MockQueueService {
    fn queue_url(&self) -> &str {
        QUEUE_URL
    }

    async fn send_message(&self, body: String) -> anyhow::Result<String> {
        if let Some(msg) = &self.fail_with {
            return Err(anyhow!(msg.clone()));
        }
        let message_id = format!("msg-{}", self.next_id.fetch_add(1, Ordering::SeqCst));
        self.messages.lock().unwrap().push_back(ReceivedMessage {
            message_id: message_id.clone(),
            body,
        });
        Ok(message_id)
    }

    async fn receive_message(&self) -> anyhow::Result<Option<ReceivedMessage>> {
        if let Some(msg) = &self.fail_with {
            return Err(anyhow!(msg.clone()));
        }
        Ok(self.messages.lock().unwrap().pop_front())
    }
}

pub struct MockSecretService {
    pub secret: Result<String, String>,
    pub calls: AtomicUsize,
}

impl MockSecretService {
    pub fn with_secret(secret: &str) -> Self {
        Self {
            secret: Ok(secret.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(msg: &str) -> Self {
        Self {
            secret: Err(msg.to_string()),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SecretService for MockSecretService {
    fn secret_name(&self) -> &str {
        SECRET_NAME
    }

    async fn get_secret_string(&self) -> anyhow::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.secret.clone().map_err(|e| anyhow!(e))
    }
}

pub struct TestApp {
    pub router: Router,
    pub storage: Arc<MockStorageService>,
    pub queue: Arc<MockQueueService>,
    pub secrets: Arc<MockSecretService>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::with_services(
            MockStorageService::default(),
            MockQueueService::default(),
            MockSecretService::with_secret(r#"{"API_KEY": "test-api-key"}"#),
        )
    }

    pub fn with_services(
        storage: MockStorageService,
        queue: MockQueueService,
        secrets: MockSecretService,
    ) -> Self {
        let storage = Arc::new(storage);
        let queue = Arc::new(queue);
        let secrets = Arc::new(secrets);

        let state = AppState {
            config: test_config(),
            storage: storage.clone(),
            queue: queue.clone(),
            secrets: secrets.clone(),
        };

        Self {
            router: create_app(state),
            storage,
            queue,
            secrets,
        }
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&body).unwrap_or(Value::Null);
        (status, json)
    }
}

pub fn multipart_request(field: &str, filename: &str, content: &str) -> Request<Body> {
    let boundary = "---------------------------123456789012345678901234567";
    let multipart_body = format!(
        "--{boundary}\r\n\
        Content-Disposition: form-data; name=\"{field}\"; filename=\"{filename}\"\r\n\
        Content-Type: text/plain\r\n\r\n\
        {content}\r\n\
        --{boundary}--\r\n",
    );

    Request::builder()
        .method("POST")
        .uri("/upload")
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={}", boundary),
        )
        .body(Body::from(multipart_body))
        .unwrap()
}
