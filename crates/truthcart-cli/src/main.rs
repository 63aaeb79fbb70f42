mod analyze;
mod fetch;
mod render;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use truthcart_core::{AnalysisMode, EngineConfig};

#[derive(Debug, Parser)]
#[command(name = "truthcart-cli")]
#[command(about = "TruthCart trust score command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Score a product offline from JSON input
    Analyze(AnalyzeArgs),
    /// Fetch signals from the configured source, then score
    Fetch(FetchArgs),
}

#[derive(Debug, Args)]
struct AnalyzeArgs {
    /// Full analysis request JSON (identity, metadata, items)
    #[arg(long, value_name = "PATH", conflicts_with = "batch")]
    request: Option<PathBuf>,

    /// Signal batch JSON, analyzed with the product flags below
    #[arg(long, value_name = "PATH")]
    batch: Option<PathBuf>,

    /// Product display name (required with --batch)
    #[arg(long)]
    product_name: Option<String>,

    /// Product page URL (required with --batch)
    #[arg(long)]
    product_url: Option<String>,

    /// Brand display name
    #[arg(long)]
    brand_name: Option<String>,

    /// fast or deep; deep expects a larger corpus before granting High confidence
    #[arg(long, default_value = "fast", value_parser = parse_mode)]
    mode: AnalysisMode,

    /// Print the raw report JSON instead of the text summary
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args)]
struct FetchArgs {
    /// Product display name
    #[arg(long)]
    product_name: String,

    /// Product page URL
    #[arg(long)]
    product_url: String,

    /// Brand display name
    #[arg(long)]
    brand_name: Option<String>,

    /// fast or deep; deep expects a larger corpus before granting High confidence
    #[arg(long, default_value = "fast", value_parser = parse_mode)]
    mode: AnalysisMode,

    /// Print the raw report JSON instead of the text summary
    #[arg(long)]
    json: bool,
}

fn parse_mode(s: &str) -> Result<AnalysisMode, String> {
    match s {
        "fast" => Ok(AnalysisMode::Fast),
        "deep" => Ok(AnalysisMode::Deep),
        other => Err(format!("unknown mode '{other}' (expected fast or deep)")),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = truthcart_core::load_app_config()?;
    let engine_config = match &config.engine_config_path {
        Some(path) => truthcart_core::load_engine_config(path)?,
        None => EngineConfig::default(),
    };

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Analyze(args)) => analyze::run_analyze(&args, &engine_config),
        Some(Commands::Fetch(args)) => fetch::run_fetch(args, &config, &engine_config).await,
        None => {
            println!("nothing to do; try `truthcart-cli analyze --help`");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
