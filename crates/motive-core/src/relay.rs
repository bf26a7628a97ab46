//! Relay implementations, one per revision.
//!
//! A [`Relay`] takes a story, calls its backend and reshapes the answer into
//! an [`AnalyzeResponse`]. The web layer only talks to this trait.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use crate::client::{HostedClient, RServerClient};
use crate::config::{RelayConfig, Revision};
use crate::error::{RelayError, RelayResult};
use crate::model::{AnalyzeResponse, Motive, RawAnalysis, RawScores};
use crate::normalize::normalize_labels;

#[async_trait]
pub trait Relay: Send + Sync {
    /// Revision this relay implements.
    fn revision(&self) -> Revision;

    /// Score a story.
    async fn analyze(&self, story: &str) -> RelayResult<AnalyzeResponse>;

    /// List the backend's models, if the revision supports it.
    async fn list_models(&self) -> RelayResult<Value> {
        Err(RelayError::Unsupported(format!(
            "revision {} does not list models",
            self.revision()
        )))
    }
}

/// Validate the configuration and build the relay for its revision.
pub fn build_relay(config: &RelayConfig) -> RelayResult<Arc<dyn Relay>> {
    config.validate()?;

    let relay: Arc<dyn Relay> = match config.revision {
        Revision::V1 => Arc::new(ScoreRelay::new(RServerClient::new(&config.r_server_url))),
        Revision::V3 => Arc::new(AnalysisRelay::new(RServerClient::new(&config.r_server_url))),
        Revision::V2 => {
            let hosted = &config.hosted;
            let url = |m: Motive| {
                hosted
                    .url(m)
                    .map(str::to_string)
                    .ok_or_else(|| RelayError::config(format!("missing hosted endpoint for '{}'", m)))
            };
            let token = hosted
                .token
                .as_deref()
                .ok_or_else(|| RelayError::config("missing hosted API token"))?;
            Arc::new(HostedRelay::new(
                HostedClient::new(token, hosted.timeout)?,
                url(Motive::Achievement)?,
                url(Motive::Affiliation)?,
                url(Motive::Power)?,
            ))
        }
    };

    info!(revision = %config.revision, "Relay ready");
    Ok(relay)
}

/// v1: flat scores from the local model server, passed through unchanged.
pub struct ScoreRelay {
    client: RServerClient,
}

impl ScoreRelay {
    pub fn new(client: RServerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Relay for ScoreRelay {
    fn revision(&self) -> Revision {
        Revision::V1
    }

    async fn analyze(&self, story: &str) -> RelayResult<AnalyzeResponse> {
        let raw: RawScores = self.client.predict(story).await?;
        let scores = raw.into_scores()?;
        debug!(?scores, "Scores relayed");
        Ok(AnalyzeResponse::Scores(scores))
    }
}

/// v2: one hosted classifier per motive, rescaled to sum to 100.
pub struct HostedRelay {
    client: HostedClient,
    achievement_url: String,
    affiliation_url: String,
    power_url: String,
}

impl HostedRelay {
    pub fn new(
        client: HostedClient,
        achievement_url: String,
        affiliation_url: String,
        power_url: String,
    ) -> Self {
        Self {
            client,
            achievement_url,
            affiliation_url,
            power_url,
        }
    }
}

#[async_trait]
impl Relay for HostedRelay {
    fn revision(&self) -> Revision {
        Revision::V2
    }

    async fn analyze(&self, story: &str) -> RelayResult<AnalyzeResponse> {
        let (achievement, affiliation, power) = futures::try_join!(
            self.client.classify(&self.achievement_url, story),
            self.client.classify(&self.affiliation_url, story),
            self.client.classify(&self.power_url, story),
        )?;

        let scores = normalize_labels(&achievement, &affiliation, &power);
        debug!(?scores, "Hosted scores normalized");
        Ok(AnalyzeResponse::Scores(scores))
    }
}

/// v3: per-sentence analysis from the local model server.
pub struct AnalysisRelay {
    client: RServerClient,
}

impl AnalysisRelay {
    pub fn new(client: RServerClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Relay for AnalysisRelay {
    fn revision(&self) -> Revision {
        Revision::V3
    }

    async fn analyze(&self, story: &str) -> RelayResult<AnalyzeResponse> {
        let raw: RawAnalysis = self.client.predict(story).await?;
        let result = raw.into_result()?;
        debug!(
            sentences = result.sentences.len(),
            motives = result.motives.len(),
            "Analysis relayed"
        );
        Ok(AnalyzeResponse::Analysis(result))
    }

    async fn list_models(&self) -> RelayResult<Value> {
        self.client.models().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_build_relay_per_revision() {
        let mut config = RelayConfig {
            revision: Revision::V1,
            ..RelayConfig::default()
        };
        assert_eq!(build_relay(&config).unwrap().revision(), Revision::V1);

        config.revision = Revision::V3;
        assert_eq!(build_relay(&config).unwrap().revision(), Revision::V3);
    }

    #[test]
    fn test_build_hosted_relay_fails_fast_without_token() {
        let mut config = RelayConfig {
            revision: Revision::V2,
            ..RelayConfig::default()
        };
        config.hosted.achievement_url = Some("http://localhost/a".to_string());
        config.hosted.affiliation_url = Some("http://localhost/b".to_string());
        config.hosted.power_url = Some("http://localhost/c".to_string());
        config.hosted.timeout = Duration::from_secs(1);

        assert!(matches!(build_relay(&config), Err(RelayError::Config(_))));

        config.hosted.token = Some("hf_token".to_string());
        assert_eq!(build_relay(&config).unwrap().revision(), Revision::V2);
    }

    #[tokio::test]
    async fn test_flat_relay_does_not_list_models() {
        let relay = ScoreRelay::new(RServerClient::new("http://127.0.0.1:1"));
        assert!(matches!(
            relay.list_models().await,
            Err(RelayError::Unsupported(_))
        ));
    }
}
