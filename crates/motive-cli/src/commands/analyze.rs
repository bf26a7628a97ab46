//! One-shot story analysis.

use anyhow::{bail, Context, Result};
use clap::Args;
use motive_core::Relay;
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use crate::output;

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Read the story from this file instead of stdin
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Print the raw JSON response
    #[arg(long)]
    pub json: bool,
}

pub async fn execute(args: AnalyzeArgs, relay: Arc<dyn Relay>) -> Result<()> {
    let story = read_story(args.file.as_ref())?;

    let response = match relay.analyze(&story).await {
        Ok(response) => response,
        Err(e) if e.is_client_error() => bail!("Backend rejected the story: {}", e),
        Err(e) => return Err(e).context("Analysis failed"),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        output::print_response(&response);
    }

    Ok(())
}

fn read_story(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut story = String::new();
            std::io::stdin()
                .read_to_string(&mut story)
                .context("Failed to read story from stdin")?;
            Ok(story)
        }
    }
}
