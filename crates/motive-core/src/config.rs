//! Relay configuration and startup validation.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::{RelayError, RelayResult};
use crate::model::Motive;

/// Default address of the local model server.
pub const DEFAULT_R_SERVER_URL: &str = "http://127.0.0.1:8001";

/// Timeout for `/predict` on the local model server.
pub const PREDICT_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for `/models` on the local model server.
pub const MODELS_TIMEOUT: Duration = Duration::from_secs(10);

/// Default timeout for hosted inference calls.
pub const DEFAULT_HOSTED_TIMEOUT_SECS: u64 = 30;

/// Which relay behaviour the process runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Revision {
    /// Local model server, flat pass-through scores.
    V1,
    /// Three hosted classifiers, normalized to sum to 100.
    V2,
    /// Local model server, per-sentence analysis.
    #[default]
    V3,
}

impl Revision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Revision::V1 => "v1",
            Revision::V2 => "v2",
            Revision::V3 => "v3",
        }
    }

    /// Model name reported by `/health`.
    pub fn model_name(&self) -> &'static str {
        match self {
            Revision::V1 | Revision::V3 => "r_server",
            Revision::V2 => "huggingface",
        }
    }

    /// Whether the revision exposes the backend model listing.
    pub fn lists_models(&self) -> bool {
        matches!(self, Revision::V3)
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Revision {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "v1" | "1" => Ok(Revision::V1),
            "v2" | "2" => Ok(Revision::V2),
            "v3" | "3" => Ok(Revision::V3),
            other => Err(RelayError::config(format!(
                "unknown revision '{}', expected v1, v2 or v3",
                other
            ))),
        }
    }
}

/// Hosted inference endpoints, one per motive, plus the bearer token.
#[derive(Debug, Clone, Default)]
pub struct HostedEndpoints {
    pub token: Option<String>,
    pub achievement_url: Option<String>,
    pub affiliation_url: Option<String>,
    pub power_url: Option<String>,
    pub timeout: Duration,
}

impl HostedEndpoints {
    pub fn url(&self, motive: Motive) -> Option<&str> {
        match motive {
            Motive::Achievement => self.achievement_url.as_deref(),
            Motive::Affiliation => self.affiliation_url.as_deref(),
            Motive::Power => self.power_url.as_deref(),
        }
    }
}

/// Everything needed to build a relay.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub revision: Revision,
    pub r_server_url: String,
    pub hosted: HostedEndpoints,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            revision: Revision::default(),
            r_server_url: DEFAULT_R_SERVER_URL.to_string(),
            hosted: HostedEndpoints {
                timeout: Duration::from_secs(DEFAULT_HOSTED_TIMEOUT_SECS),
                ..HostedEndpoints::default()
            },
        }
    }
}

impl RelayConfig {
    /// Check the configuration for the selected revision.
    ///
    /// The hosted revision refuses to start without a token and all three
    /// endpoint URLs.
    pub fn validate(&self) -> RelayResult<()> {
        match self.revision {
            Revision::V1 | Revision::V3 => check_url("r_server_url", &self.r_server_url),
            Revision::V2 => {
                match self.hosted.token.as_deref().map(str::trim) {
                    Some(token) if !token.is_empty() => {}
                    _ => {
                        return Err(RelayError::config(
                            "hosted revision requires an API token (HF_API_TOKEN)",
                        ))
                    }
                }
                for motive in Motive::ALL {
                    let url = self.hosted.url(motive).ok_or_else(|| {
                        RelayError::config(format!("missing hosted endpoint for '{}'", motive))
                    })?;
                    check_url(motive.as_str(), url)?;
                }
                if self.hosted.timeout.is_zero() {
                    return Err(RelayError::config("hosted timeout must be positive"));
                }
                Ok(())
            }
        }
    }
}

fn check_url(name: &str, url: &str) -> RelayResult<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(RelayError::config(format!(
            "{} must be an http(s) URL, got '{}'",
            name, url
        )))
    }
}
