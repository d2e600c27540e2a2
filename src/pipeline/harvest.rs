// src/pipeline/harvest.rs

//! Stage 1: harvest the category into a raw index.

use chrono::Utc;

use crate::error::Result;
use crate::models::{CategoryIndex, Config, HarvestReport, HarvestStats};
use crate::services::{CorpusBuilder, MetadataExtractor, WikiClient};
use crate::storage::{DocumentStore, read_json, write_json};
use crate::utils::http::ApiTransport;

fn builder<'a, T: ApiTransport>(
    config: &Config,
    client: &'a WikiClient<T>,
    extractor: &'a MetadataExtractor,
) -> CorpusBuilder<'a, T> {
    CorpusBuilder::new(client, extractor)
        .title_delay(config.harvest.title_delay())
        .show_progress(config.logging.show_progress)
}

fn log_summary(report: &HarvestReport, stats: &HarvestStats) {
    log::info!("Harvest summary:");
    log::info!("    Titles listed: {}", report.listed);
    log::info!("    Listing pages: {}", report.listing_pages);
    log::info!("    Harvested: {}", report.harvested);
    log::info!("    No content: {}", report.missing.len());
    log::info!("    Failed (retryable): {}", report.failed.len());
    log::info!("    Elapsed: {}s", stats.elapsed_secs());
    if !report.listing_complete {
        log::warn!("Category listing ended early; the corpus is partial");
    }
}

/// Harvest `category` and persist the raw index and the run report.
pub async fn run_harvest<T: ApiTransport>(
    config: &Config,
    client: &WikiClient<T>,
    store: &dyn DocumentStore,
    category: &str,
) -> Result<HarvestReport> {
    let start_time = Utc::now();
    log::info!("Harvesting Category:{}", category.trim_start_matches("Category:"));

    let extractor = MetadataExtractor::new()?;
    let harvest = builder(config, client, &extractor).build(category).await;

    write_json(store, &config.paths.raw_corpus, &harvest.index).await?;
    write_json(store, &config.paths.failures, &harvest.report).await?;
    log::info!(
        "Saved results to {}",
        store.location(&config.paths.raw_corpus)
    );

    let stats = HarvestStats {
        start_time,
        end_time: Utc::now(),
    };
    log_summary(&harvest.report, &stats);

    Ok(harvest.report)
}

/// Re-fetch the titles that failed last time and append them to the raw index.
pub async fn run_retry_failed<T: ApiTransport>(
    config: &Config,
    client: &WikiClient<T>,
    store: &dyn DocumentStore,
) -> Result<HarvestReport> {
    let start_time = Utc::now();
    let previous: HarvestReport = read_json(store, &config.paths.failures)
        .await?
        .unwrap_or_default();

    if previous.failed.is_empty() {
        log::info!("No failed titles to retry");
        return Ok(HarvestReport::default());
    }
    log::info!("Retrying {} failed titles", previous.failed.len());

    let mut index: CategoryIndex = read_json(store, &config.paths.raw_corpus)
        .await?
        .unwrap_or_default();

    let extractor = MetadataExtractor::new()?;
    let harvest = builder(config, client, &extractor)
        .build_titles(&previous.failed)
        .await;

    index.merge(harvest.index);
    write_json(store, &config.paths.raw_corpus, &index).await?;
    write_json(store, &config.paths.failures, &harvest.report).await?;

    let stats = HarvestStats {
        start_time,
        end_time: Utc::now(),
    };
    log_summary(&harvest.report, &stats);

    Ok(harvest.report)
}
