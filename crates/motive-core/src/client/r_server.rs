//! Client for the local statistical-model server.
//!
//! The server exposes `POST /predict` taking `{"text": ...}` and
//! `GET /models` listing the loaded models.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use super::read_json;
use crate::config::{MODELS_TIMEOUT, PREDICT_TIMEOUT};
use crate::error::RelayResult;

/// Local model server client. Timeouts are set per request.
#[derive(Clone)]
pub struct RServerClient {
    base_url: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct PredictRequest<'a> {
    text: &'a str,
}

impl RServerClient {
    /// Create a client for the server at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Send a story to `/predict` and decode the response as `T`.
    pub async fn predict<T: DeserializeOwned>(&self, text: &str) -> RelayResult<T> {
        let url = format!("{}/predict", self.base_url);
        debug!(url = %url, chars = text.len(), "Calling model server");

        let response = self
            .client
            .post(&url)
            .timeout(PREDICT_TIMEOUT)
            .json(&PredictRequest { text })
            .send()
            .await?;

        read_json(response).await
    }

    /// Fetch the model listing, returned as-is.
    pub async fn models(&self) -> RelayResult<Value> {
        let url = format!("{}/models", self.base_url);
        debug!(url = %url, "Listing backend models");

        let response = self
            .client
            .get(&url)
            .timeout(MODELS_TIMEOUT)
            .send()
            .await?;

        read_json(response).await
    }
}
