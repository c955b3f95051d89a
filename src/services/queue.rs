use anyhow::{Result, anyhow};
use async_trait::async_trait;
use aws_sdk_sqs::Client;
use aws_sdk_sqs::error::DisplayErrorContext;

/// A message taken off the queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedMessage {
    pub message_id: String,
    pub body: String,
}

#[async_trait]
pub trait QueueService: Send + Sync {
    fn queue_url(&self) -> &str;

    /// Enqueue `body` and return the provider-assigned message id.
    async fn send_message(&self, body: String) -> Result<String>;

    /// Poll for a single message without waiting. A returned message has
    /// already been deleted from the queue.
    async fn receive_message(&self) -> Result<Option<ReceivedMessage>>;
}

pub struct SqsQueueService {
    client: Client,
    queue_url: String,
}

impl SqsQueueService {
    pub fn new(client: Client, queue_url: String) -> Self {
        Self { client, queue_url }
    }
}

#[async_trait]
impl QueueService for SqsQueueService {
    fn queue_url(&self) -> &str {
        &self.queue_url
    }

    async fn send_message(&self, body: String) -> Result<String> {
        let output = self
            .client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(body)
            .send()
            .await
            .map_err(|e| anyhow!("{}", DisplayErrorContext(&e)))?;

        output
            .message_id()
            .map(str::to_string)
            .ok_or_else(|| anyhow!("SendMessage returned no MessageId"))
    }

    async fn receive_message(&self) -> Result<Option<ReceivedMessage>> {
        let output = self
            .client
            .receive_message()
            .queue_url(&self.queue_url)
            .max_number_of_messages(1)
            .wait_time_seconds(0)
            .send()
            .await
            .map_err(|e| anyhow!("{}", DisplayErrorContext(&e)))?;

        let Some(message) = output.messages.unwrap_or_default().into_iter().next() else {
            return Ok(None);
        };

        let receipt_handle = message
            .receipt_handle()
            .ok_or_else(|| anyhow!("ReceiveMessage returned no ReceiptHandle"))?;

        // At-most-once: the message is gone before the caller sees it.
        self.client
            .delete_message()
            .queue_url(&self.queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await
            .map_err(|e| anyhow!("{}", DisplayErrorContext(&e)))?;

        Ok(Some(ReceivedMessage {
            message_id: message.message_id().unwrap_or_default().to_string(),
            body: message.body().unwrap_or_default().to_string(),
        }))
    }
}
