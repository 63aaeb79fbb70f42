//! Remote analysis: fetch a signal batch over HTTP, then score it.

use chrono::Utc;
use truthcart_core::{AnalysisRequest, AppConfig, EngineConfig};
use truthcart_source::{HttpSignalSource, SourceQuery};

use crate::{render, FetchArgs};

/// Fetch signals for one product from the configured endpoint and print the
/// report. Unlike the server, fetch failures surface as errors here rather
/// than degrading: the caller explicitly asked for remote data.
///
/// # Errors
///
/// Returns an error if `TRUTHCART_SOURCE_URL` is not configured, the fetch
/// fails, or the response is not a valid batch.
pub(crate) async fn run_fetch(
    args: FetchArgs,
    config: &AppConfig,
    engine_config: &EngineConfig,
) -> anyhow::Result<()> {
    let source_url = config.source_url_required()?;
    let client = HttpSignalSource::new(
        source_url,
        config.source_timeout_secs,
        &config.source_user_agent,
    )?;

    let query = SourceQuery {
        product_name: args.product_name.clone(),
        brand_name: args.brand_name.clone(),
        product_url: args.product_url.clone(),
        mode: args.mode,
    };
    tracing::debug!(endpoint = %client.endpoint(), product = %query.product_name, "fetching signals");
    let batch = client.fetch(&query).await?;
    println!(
        "fetched {} items{}",
        batch.items.len(),
        if batch.metadata.is_some() {
            " (with product metadata)"
        } else {
            ""
        }
    );

    let request = AnalysisRequest {
        product_name: args.product_name,
        brand_name: args.brand_name,
        product_url: args.product_url,
        mode: args.mode,
        metadata: batch.metadata,
        items: batch.items,
    };
    let report = truthcart_engine::analyze(request, Utc::now().date_naive(), engine_config);
    render::print_report(&report, args.json)
}
