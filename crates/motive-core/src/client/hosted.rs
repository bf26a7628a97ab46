//! Client for hosted text-classification inference endpoints.

use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use super::read_json;
use crate::error::RelayResult;
use crate::model::{LabelScore, LabelScores};

/// Bearer-authenticated inference client, shared by all three endpoints.
#[derive(Clone)]
pub struct HostedClient {
    token: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
}

impl HostedClient {
    /// Build a client whose every call is bounded by `timeout`.
    pub fn new(token: &str, timeout: Duration) -> RelayResult<Self> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            token: token.to_string(),
            client,
        })
    }

    /// Classify `text` with the model at `url`, returning every candidate label.
    pub async fn classify(&self, url: &str, text: &str) -> RelayResult<Vec<LabelScore>> {
        debug!(url, chars = text.len(), "Calling hosted classifier");

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.token)
            .json(&InferenceRequest { inputs: text })
            .send()
            .await?;

        let scores: LabelScores = read_json(response).await?;
        Ok(scores.into_records())
    }
}
