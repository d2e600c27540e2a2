// src/services/corpus.rs

//! Corpus builder service.
//!
//! Enumerates a category, fetches every page in turn and files each title
//! under the labels its template declares.

use std::time::Duration;

use crate::models::{
    Category, CategoryIndex, Harvest, HarvestReport, PageContent, UNKNOWN_DIFFICULTY,
};
use crate::services::{MetadataExtractor, WikiClient};
use crate::utils::http::ApiTransport;

/// Sequential harvester over a [`WikiClient`].
pub struct CorpusBuilder<'a, T> {
    client: &'a WikiClient<T>,
    extractor: &'a MetadataExtractor,
    title_delay: Duration,
    show_progress: bool,
}

impl<'a, T: ApiTransport> CorpusBuilder<'a, T> {
    pub fn new(client: &'a WikiClient<T>, extractor: &'a MetadataExtractor) -> Self {
        Self {
            client,
            extractor,
            title_delay: Duration::ZERO,
            show_progress: false,
        }
    }

    /// Delay slept after each indexed title.
    pub fn title_delay(mut self, delay: Duration) -> Self {
        self.title_delay = delay;
        self
    }

    /// Log per-title progress at info instead of debug.
    pub fn show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Harvest every title listed in `category`.
    pub async fn build(&self, category: &str) -> Harvest {
        let listing = self.client.enumerate_category(category).await;
        log::info!("Found {} recipes", listing.titles.len());

        let mut harvest = self.build_titles(&listing.titles).await;
        harvest.report.listing_pages = listing.pages;
        harvest.report.listing_complete = listing.complete;
        harvest
    }

    /// Fetch and index the given titles, in order.
    pub async fn build_titles(&self, titles: &[String]) -> Harvest {
        let mut index = CategoryIndex::default();
        let mut report = HarvestReport {
            listed: titles.len(),
            ..HarvestReport::default()
        };

        for (idx, title) in titles.iter().enumerate() {
            let line = format!("[{}/{}] Processing {}...", idx + 1, titles.len(), title);
            if self.show_progress {
                log::info!("{line}");
            } else {
                log::debug!("{line}");
            }

            let text = match self.client.get_body(title).await {
                PageContent::Body(text) => text,
                PageContent::Missing => {
                    log::debug!("No content for {title}; skipping");
                    report.missing.push(title.clone());
                    continue;
                }
                PageContent::Failed(_) => {
                    report.failed.push(title.clone());
                    continue;
                }
            };

            self.index_page(&mut index, title, &text);
            report.harvested += 1;

            if !self.title_delay.is_zero() {
                tokio::time::sleep(self.title_delay).await;
            }
        }

        Harvest { index, report }
    }

    /// File `title` under each label found in `text`.
    fn index_page(&self, index: &mut CategoryIndex, title: &str, text: &str) {
        let meta = self.extractor.extract(text);

        for category in Category::ALL {
            match meta.get(&category) {
                Some(value) => index.push(category, value.to_lowercase(), title),
                None if category == Category::Difficulty => {
                    index.push(category, UNKNOWN_DIFFICULTY, title)
                }
                None => {}
            }
        }
    }
}
