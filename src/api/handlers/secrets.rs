use crate::AppState;
use crate::api::error::AppError;
use crate::services::secrets::extract_api_key;
use axum::{Json, extract::State};
use serde::Serialize;
use serde_json::Value;
use tracing::{error, info};
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct SecretResponse {
    #[schema(value_type = String)]
    pub api_key: Value,
}

#[utoipa::path(
    get,
    path = "/secret",
    responses(
        (status = 200, description = "API key read from the secret store", body = SecretResponse),
        (status = 500, description = "Secret store error or missing API_KEY")
    ),
    tag = "secrets"
)]
pub async fn get_secret(State(state): State<AppState>) -> Result<Json<SecretResponse>, AppError> {
    info!("Attempting to get secret {}", state.secrets.secret_name());

    let api_key = async {
        let secret = state.secrets.get_secret_string().await?;
        extract_api_key(&secret)
    }
    .await
    .map_err(|e| {
        error!("Error getting secret: {}", e);
        AppError::from(e)
    })?;

    Ok(Json(SecretResponse { api_key }))
}
