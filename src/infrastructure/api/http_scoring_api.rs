use crate::application::ports::ScoringApi;
use crate::domain::entities::{BatchEntry, BatchOutcome, HeatDataset, HeatVersion};
use crate::domain::value_objects::JudgeId;
use crate::shared::config::ServerConfig;
use crate::shared::error::AppError;
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::debug;

/// reqwest-backed client for the scoring server.
///
/// Error mapping is the contract the rest of the engine leans on:
/// transport failures (connect, timeout, DNS) become `Network` and flip
/// the engine into offline queueing; 4xx becomes `Validation` and is
/// surfaced immediately; any other non-success status becomes `Http`.
pub struct HttpScoringApi {
    client: Client,
    base_url: String,
}

impl HttpScoringApi {
    pub fn new(base_url: impl Into<String>, request_timeout: Duration) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|err| AppError::Configuration(err.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ServerConfig) -> Result<Self, AppError> {
        Self::new(
            config.base_url.clone(),
            Duration::from_secs(config.request_timeout),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn check_status(response: Response) -> Result<Response, AppError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        if status.is_client_error() && status != StatusCode::REQUEST_TIMEOUT {
            Err(AppError::Validation(format!("{status}: {message}")))
        } else {
            Err(AppError::Http {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl ScoringApi for HttpScoringApi {
    async fn post_score(&self, judge: &JudgeId, body: &Value) -> Result<Value, AppError> {
        let url = self.url(&format!("/scores/{judge}/post"));
        debug!(%url, "posting score");
        let response = self
            .client
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|err| AppError::Network(err.to_string()))?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn post_batch(
        &self,
        judge: &JudgeId,
        scores: &[BatchEntry],
    ) -> Result<BatchOutcome, AppError> {
        let url = self.url(&format!("/scores/{judge}/batch"));
        debug!(%url, count = scores.len(), "uploading score batch");
        let response = self
            .client
            .post(&url)
            .json(&json!({ "scores": scores }))
            .send()
            .await
            .map_err(|err| AppError::Network(err.to_string()))?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn fetch_heats(&self, judge: &JudgeId) -> Result<HeatDataset, AppError> {
        let url = self.url(&format!("/scores/{judge}/heats.json"));
        debug!(%url, "fetching heat dataset");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| AppError::Network(err.to_string()))?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }

    async fn fetch_version(
        &self,
        judge: &JudgeId,
        heat_number: i64,
    ) -> Result<HeatVersion, AppError> {
        let url = self.url(&format!("/scores/{judge}/version/{heat_number}"));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| AppError::Network(err.to_string()))?;
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }
}
