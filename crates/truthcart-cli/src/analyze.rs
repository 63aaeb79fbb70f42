//! Offline analysis: score a request or signal batch read from disk.

use std::path::Path;

use anyhow::Context;
use chrono::Utc;
use truthcart_core::{AnalysisRequest, EngineConfig};
use truthcart_source::StaticSignalSource;

use crate::{render, AnalyzeArgs};

/// Run one offline analysis and print the report.
///
/// # Errors
///
/// Returns an error if neither `--request` nor `--batch` was given, a file
/// cannot be read or parsed, or `--batch` lacks the product identity flags.
pub(crate) fn run_analyze(args: &AnalyzeArgs, engine_config: &EngineConfig) -> anyhow::Result<()> {
    let request = build_request(args)?;
    let report = truthcart_engine::analyze(request, Utc::now().date_naive(), engine_config);
    render::print_report(&report, args.json)
}

fn build_request(args: &AnalyzeArgs) -> anyhow::Result<AnalysisRequest> {
    if let Some(path) = &args.request {
        return load_request(path);
    }

    let Some(batch_path) = &args.batch else {
        anyhow::bail!("provide --request <path> or --batch <path>");
    };
    let product_name = args
        .product_name
        .clone()
        .ok_or_else(|| anyhow::anyhow!("--product-name is required with --batch"))?;
    let product_url = args
        .product_url
        .clone()
        .ok_or_else(|| anyhow::anyhow!("--product-url is required with --batch"))?;

    let batch = StaticSignalSource::from_json_file(batch_path)?.batch();
    Ok(AnalysisRequest {
        product_name,
        brand_name: args.brand_name.clone(),
        product_url,
        mode: args.mode,
        metadata: batch.metadata,
        items: batch.items,
    })
}

fn load_request(path: &Path) -> anyhow::Result<AnalysisRequest> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read request file {}", path.display()))?;
    let request = serde_json::from_str(&raw)
        .with_context(|| format!("invalid analysis request in {}", path.display()))?;
    Ok(request)
}
