//! The analyze endpoint: resolve signals, run the engine, return the report.

use std::sync::Arc;

use axum::{extract::State, Extension, Json};
use chrono::Utc;
use serde::Deserialize;
use truthcart_core::{AnalysisMode, AnalysisReport, AnalysisRequest, ProductMetadata, RawSignalItem};
use truthcart_source::{SourceBatch, SourceError, SourceQuery};

use crate::api::{ApiError, AppState};
use crate::middleware::RequestId;

/// Incoming request body. Everything optional so field validation produces
/// the contract's 400 body instead of a deserialization rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AnalyzeBody {
    product_name: Option<String>,
    brand_name: Option<String>,
    product_url: Option<String>,
    mode: AnalysisMode,
    metadata: Option<ProductMetadata>,
    items: Option<Vec<RawSignalItem>>,
}

/// POST `/api/v1/analyze`.
///
/// Resolves raw items through the configured signal source (unless the
/// caller posted its own), runs the scoring pipeline, and returns the full
/// report. Source failures and timeouts degrade to an empty item list; the
/// engine then reports insufficient data rather than an error.
pub async fn analyze(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<AnalyzeBody>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let (Some(product_name), Some(product_url)) =
        (non_empty(body.product_name), non_empty(body.product_url))
    else {
        return Err(ApiError::missing_fields());
    };

    tracing::info!(
        request_id = %req_id.0,
        product = %product_name,
        mode = ?body.mode,
        "analyze request"
    );

    let batch = match body.items {
        // The caller already resolved items; skip the source entirely.
        Some(items) => SourceBatch {
            items,
            metadata: None,
        },
        None => {
            let query = SourceQuery {
                product_name: product_name.clone(),
                brand_name: body.brand_name.clone(),
                product_url: product_url.clone(),
                mode: body.mode,
            };
            fetch_batch(&state, &query).await
        }
    };

    // Caller-supplied metadata wins over whatever the source reports.
    let metadata = body.metadata.or(batch.metadata);

    let request = AnalysisRequest {
        product_name,
        brand_name: body.brand_name,
        product_url,
        mode: body.mode,
        metadata,
        items: batch.items,
    };

    let today = Utc::now().date_naive();
    let engine_config = Arc::clone(&state.engine_config);
    let report =
        tokio::task::spawn_blocking(move || truthcart_engine::analyze(request, today, &engine_config))
            .await
            .map_err(|e| {
                tracing::error!(request_id = %req_id.0, error = %e, "analysis task failed");
                ApiError::internal(e.to_string())
            })?;

    Ok(Json(report))
}

/// Fetches from the signal source under the configured timeout, degrading
/// every failure mode to an empty batch.
async fn fetch_batch(state: &AppState, query: &SourceQuery) -> SourceBatch {
    match tokio::time::timeout(state.source_timeout, state.source.fetch(query)).await {
        Ok(Ok(batch)) => batch,
        Ok(Err(SourceError::Disabled)) => {
            tracing::debug!(
                product = %query.product_name,
                "signal source disabled; analyzing without items"
            );
            SourceBatch::default()
        }
        Ok(Err(e)) => {
            tracing::warn!(
                product = %query.product_name,
                error = %e,
                "signal source failed; degrading to empty batch"
            );
            SourceBatch::default()
        }
        Err(_) => {
            tracing::warn!(
                product = %query.product_name,
                timeout_secs = state.source_timeout.as_secs(),
                "signal source timed out; degrading to empty batch"
            );
            SourceBatch::default()
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_rejects_blank_strings() {
        assert_eq!(non_empty(None), None);
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(Some("   ".to_string())), None);
        assert_eq!(
            non_empty(Some("kettle".to_string())),
            Some("kettle".to_string())
        );
    }

    #[test]
    fn empty_body_deserializes_with_defaults() {
        let body: AnalyzeBody = serde_json::from_str("{}").expect("parse");
        assert!(body.product_name.is_none());
        assert!(body.items.is_none());
        assert_eq!(body.mode, AnalysisMode::Fast);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let body: AnalyzeBody = serde_json::from_str(
            r#"{"product_name": "Kettle", "product_url": "https://x", "widget_version": 3}"#,
        )
        .expect("parse");
        assert_eq!(body.product_name.as_deref(), Some("Kettle"));
    }
}
