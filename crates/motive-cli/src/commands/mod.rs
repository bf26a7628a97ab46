//! CLI command definitions and handlers.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use motive_core::config::DEFAULT_HOSTED_TIMEOUT_SECS;
use motive_core::{HostedEndpoints, RelayConfig, Revision};
use std::time::Duration;

pub mod analyze;
pub mod serve;

/// Motive Relay - story motive scoring over HTTP
#[derive(Parser)]
#[command(name = "motive")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub relay: RelayArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the relay HTTP server
    Serve(serve::ServeArgs),

    /// Score a single story and print the result
    Analyze(analyze::AnalyzeArgs),
}

/// Backend selection, shared by every command.
#[derive(Args)]
pub struct RelayArgs {
    /// Relay revision: v1 (flat scores), v2 (hosted), v3 (sentence analysis)
    #[arg(long, global = true, env = "MOTIVE_REVISION", default_value = "v3")]
    pub revision: Revision,

    /// Base URL of the local model server
    #[arg(
        long,
        global = true,
        env = "R_SERVER_URL",
        default_value = motive_core::config::DEFAULT_R_SERVER_URL
    )]
    pub r_server_url: String,

    /// Bearer token for the hosted inference endpoints
    #[arg(long, global = true, env = "HF_API_TOKEN", hide_env_values = true)]
    pub hf_token: Option<String>,

    /// Hosted achievement classifier URL
    #[arg(long, global = true, env = "HF_ACHIEVEMENT_URL")]
    pub hf_achievement_url: Option<String>,

    /// Hosted affiliation classifier URL
    #[arg(long, global = true, env = "HF_AFFILIATION_URL")]
    pub hf_affiliation_url: Option<String>,

    /// Hosted power classifier URL
    #[arg(long, global = true, env = "HF_POWER_URL")]
    pub hf_power_url: Option<String>,

    /// Timeout for each hosted call, in seconds
    #[arg(long, global = true, env = "HF_TIMEOUT_SECS", default_value_t = DEFAULT_HOSTED_TIMEOUT_SECS)]
    pub hf_timeout_secs: u64,
}

impl RelayArgs {
    pub fn to_config(&self) -> RelayConfig {
        RelayConfig {
            revision: self.revision,
            r_server_url: self.r_server_url.clone(),
            hosted: HostedEndpoints {
                token: self.hf_token.clone(),
                achievement_url: self.hf_achievement_url.clone(),
                affiliation_url: self.hf_affiliation_url.clone(),
                power_url: self.hf_power_url.clone(),
                timeout: Duration::from_secs(self.hf_timeout_secs),
            },
        }
    }
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.relay.to_config();
        tracing::debug!(
            revision = %config.revision,
            r_server_url = %config.r_server_url,
            "Configuration loaded"
        );
        let relay = motive_core::build_relay(&config)
            .with_context(|| format!("Invalid configuration for revision {}", config.revision))?;

        match self.command {
            Commands::Serve(args) => serve::execute(args, relay).await,
            Commands::Analyze(args) => analyze::execute(args, relay).await,
        }
    }
}
