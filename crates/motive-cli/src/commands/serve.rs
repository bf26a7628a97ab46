//! Relay server command.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use motive_core::Relay;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(long, env = "MOTIVE_PORT", default_value = "8000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "MOTIVE_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Also write logs to a file
    #[arg(long)]
    pub log: bool,

    /// Log file used with --log
    #[arg(long, default_value = "motive.log")]
    pub log_file: PathBuf,
}

pub async fn execute(args: ServeArgs, relay: Arc<dyn Relay>) -> Result<()> {
    let revision = relay.revision();

    println!();
    println!(
        "  {} {} {}",
        "Motive".cyan().bold(),
        "Relay".bold(),
        format!("({})", revision).dimmed()
    );
    println!();
    println!(
        "  {}  http://{}:{}/analyze",
        "Analyze".green(),
        args.host,
        args.port
    );
    println!(
        "  {}   http://{}:{}/health",
        "Health".green(),
        args.host,
        args.port
    );
    if revision.lists_models() {
        println!(
            "  {}   http://{}:{}/models",
            "Models".green(),
            args.host,
            args.port
        );
    }
    println!();
    println!("  {}", "Ctrl+C to stop".dimmed());
    println!();

    motive_web::run_server(relay, &args.host, args.port).await?;

    Ok(())
}
