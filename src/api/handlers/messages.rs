use crate::AppState;
use crate::api::error::AppError;
use axum::{Json, body::Bytes, extract::State};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};
use utoipa::ToSchema;

pub const NO_MESSAGES: &str = "No messages available";

#[derive(Serialize, ToSchema)]
pub struct SendMessageResponse {
    pub message: String,
    pub message_id: String,
}

#[derive(Serialize, ToSchema)]
#[serde(untagged)]
pub enum ReceiveMessageResponse {
    Empty {
        message: String,
    },
    Message {
        message_id: String,
        #[schema(value_type = Object)]
        body: Value,
    },
}

/// Parse a send-message body. Anything but a JSON object carrying a `message`
/// key is rejected.
pub fn parse_send_body(raw: &[u8]) -> Result<Value, AppError> {
    let no_message = || AppError::BadRequest("No message provided".to_string());
    let data: Value = serde_json::from_slice(raw).map_err(|_| no_message())?;
    match data.as_object() {
        Some(fields) if fields.contains_key("message") => Ok(data),
        _ => Err(no_message()),
    }
}

#[utoipa::path(
    post,
    path = "/message",
    request_body(content = Object, description = "JSON object with a `message` field", content_type = "application/json"),
    responses(
        (status = 200, description = "Message enqueued", body = SendMessageResponse),
        (status = 400, description = "No message provided"),
        (status = 500, description = "Queue error")
    ),
    tag = "queue"
)]
pub async fn send_message(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<SendMessageResponse>, AppError> {
    let data = parse_send_body(&body)?;

    info!("Attempting to send message to queue {}", state.queue.queue_url());
    let message_id = state
        .queue
        .send_message(data.to_string())
        .await
        .map_err(|e| {
            error!("Error sending message: {}", e);
            AppError::from(e)
        })?;

    Ok(Json(SendMessageResponse {
        message: "Message sent successfully".to_string(),
        message_id,
    }))
}

#[utoipa::path(
    get,
    path = "/message",
    responses(
        (status = 200, description = "One message (deleted on read) or the empty-queue sentinel", body = ReceiveMessageResponse),
        (status = 500, description = "Queue error")
    ),
    tag = "queue"
)]
pub async fn receive_message(
    State(state): State<AppState>,
) -> Result<Json<ReceiveMessageResponse>, AppError> {
    info!("Attempting to receive message from queue {}", state.queue.queue_url());
    let received = state.queue.receive_message().await.map_err(|e| {
        error!("Error receiving message: {}", e);
        AppError::from(e)
    })?;

    let Some(message) = received else {
        return Ok(Json(ReceiveMessageResponse::Empty {
            message: NO_MESSAGES.to_string(),
        }));
    };

    let body: Value = serde_json::from_str(&message.body).map_err(|e| {
        error!("Unexpected error: {}", e);
        AppError::Provider(e.to_string())
    })?;

    Ok(Json(ReceiveMessageResponse::Message {
        message_id: message.message_id,
        body,
    }))
}
