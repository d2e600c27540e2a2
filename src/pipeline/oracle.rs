// src/pipeline/oracle.rs

//! Serving side: what a front-end calls.
//!
//! Load the normalized corpus once, pick titles under optional filters,
//! and fetch and render a page for display.

use std::fmt;

use rand::Rng;

use crate::error::{AppError, Result};
use crate::models::{Config, NormalizedIndex, PageContent, RecipeInfo};
use crate::services::{SelectionQuery, WikiClient, clean_markup, select};
use crate::storage::{DocumentStore, read_json};
use crate::utils::http::ApiTransport;
use crate::utils::{page_link, truncate_display};

/// Placeholder shown when a page has no revision content.
pub const NO_CONTENT: &str = "No recipe content found.";

/// Load the normalized corpus stored under `key`.
pub async fn load_corpus(store: &dyn DocumentStore, key: &str) -> Result<NormalizedIndex> {
    let corpus: NormalizedIndex = read_json(store, key).await?.ok_or_else(|| {
        AppError::config(format!(
            "Corpus not found at {}. Run 'harvest' and 'normalize' first.",
            store.location(key)
        ))
    })?;

    log::info!(
        "Loaded corpus with {} recipes in {} difficulty and {} time buckets",
        corpus.recipe_count(),
        corpus.difficulty().len(),
        corpus.time().len()
    );
    Ok(corpus)
}

/// Display text for a page lookup, at most `max_chars` characters of body.
///
/// Failures become inline placeholder text rather than errors.
pub fn render(content: &PageContent, max_chars: usize) -> String {
    match content {
        PageContent::Body(raw) => truncate_display(&clean_markup(raw), max_chars).to_string(),
        PageContent::Missing => NO_CONTENT.to_string(),
        PageContent::Failed(failure) => format!("Failed to fetch recipe: {}", failure.reason),
    }
}

/// Everything a front-end shows for one pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeCard {
    pub title: String,
    pub body: String,
    pub info: RecipeInfo,
    pub link: String,
}

impl fmt::Display for RecipeCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "========== RECIPE =========")?;
        writeln!(f, "{}", self.body)?;
        writeln!(f)?;
        writeln!(f, "========== INFO =========")?;
        writeln!(f, "Recipe: {}", self.title)?;
        writeln!(f, "Difficulty: {}", self.info.difficulty_label())?;
        writeln!(f, "Time: {}", self.info.time_label())?;
        write!(f, "Link: {}", self.link)
    }
}

/// Read-only corpus plus the client used to fetch picked pages.
pub struct Oracle<T> {
    client: WikiClient<T>,
    corpus: NormalizedIndex,
    max_chars: usize,
    page_url_base: String,
}

impl<T: ApiTransport> Oracle<T> {
    pub fn new(client: WikiClient<T>, corpus: NormalizedIndex, config: &Config) -> Self {
        Self {
            client,
            corpus,
            max_chars: config.display.max_chars,
            page_url_base: config.wiki.page_url_base.clone(),
        }
    }

    pub fn corpus(&self) -> &NormalizedIndex {
        &self.corpus
    }

    /// Difficulty bucket keys, in corpus order.
    pub fn difficulty_options(&self) -> Vec<&str> {
        self.corpus.difficulty().keys().map(String::as_str).collect()
    }

    /// Time bucket keys, in corpus order.
    pub fn time_options(&self) -> Vec<&str> {
        self.corpus.time().keys().map(String::as_str).collect()
    }

    /// Pick a title; empty filters count as unset.
    pub fn select<R: Rng + ?Sized>(
        &self,
        difficulty: Option<&str>,
        time: Option<&str>,
        rng: &mut R,
    ) -> Result<String> {
        select(&self.corpus, &SelectionQuery::new(difficulty, time), rng)
    }

    /// Fetch `title` and return cleaned, truncated display text.
    pub async fn fetch_and_render(&self, title: &str) -> String {
        render(&self.client.get_body(title).await, self.max_chars)
    }

    /// Difficulty and time buckets of `title`.
    pub fn info_for(&self, title: &str) -> RecipeInfo {
        self.corpus.info_for(title)
    }

    pub fn link_for(&self, title: &str) -> String {
        page_link(&self.page_url_base, title)
    }

    /// Fetch, render and describe `title`.
    pub async fn card(&self, title: &str) -> RecipeCard {
        RecipeCard {
            title: title.to_string(),
            body: self.fetch_and_render(title).await,
            info: self.info_for(title),
            link: self.link_for(title),
        }
    }
}
