//! # Motive Core
//!
//! Data model, score normalization and backend clients for the motive relay.
//!
//! The relay forwards a story to a text-classification backend and reshapes
//! the result into achievement / affiliation / power scores. Three relay
//! revisions are available, see [`Revision`].

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod normalize;
pub mod relay;

pub use config::{HostedEndpoints, RelayConfig, Revision};
pub use error::{RelayError, RelayResult};
pub use model::{AnalysisResult, AnalyzeResponse, Motive, MotiveScores, StoryRequest};
pub use relay::{build_relay, AnalysisRelay, HostedRelay, Relay, ScoreRelay};
