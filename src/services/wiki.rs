// src/services/wiki.rs

//! MediaWiki API client.
//!
//! Walks a category listing page by page and fetches raw wikitext of single
//! pages, both through the retrying [`HttpFetcher`].

use std::time::Duration;

use serde_json::Value;

use crate::models::{CategoryListing, PageContent};
use crate::utils::http::{ApiTransport, HttpFetcher};

/// Client for the two wiki queries the harvester needs.
pub struct WikiClient<T> {
    fetcher: HttpFetcher<T>,
    page_delay: Duration,
}

impl<T: ApiTransport> WikiClient<T> {
    /// `page_delay` is slept between listing pages.
    pub fn new(fetcher: HttpFetcher<T>, page_delay: Duration) -> Self {
        Self {
            fetcher,
            page_delay,
        }
    }

    /// Collect every page title in `category`, following continuation tokens.
    ///
    /// A page that fails after retries ends the walk early; whatever was
    /// collected so far is returned with `complete` unset.
    pub async fn enumerate_category(&self, category: &str) -> CategoryListing {
        let gcmtitle = if category.starts_with("Category:") {
            category.to_string()
        } else {
            format!("Category:{category}")
        };

        let mut listing = CategoryListing::default();
        let mut token: Option<String> = None;

        loop {
            let mut params = vec![
                ("action", "query".to_string()),
                ("generator", "categorymembers".to_string()),
                ("gcmtitle", gcmtitle.clone()),
                ("gcmlimit", "max".to_string()),
                ("format", "json".to_string()),
            ];
            if let Some(token) = &token {
                params.push(("gcmcontinue", token.clone()));
            }

            let data = match self.fetcher.fetch(&params).await {
                Ok(data) => data,
                Err(failure) => {
                    log::warn!(
                        "Listing {} stopped after {} page(s): {}",
                        gcmtitle,
                        listing.pages,
                        failure
                    );
                    return listing;
                }
            };

            listing.pages += 1;
            listing.titles.extend(page_titles(&data));
            log::debug!(
                "Listing page {} of {}: {} titles so far",
                listing.pages,
                gcmtitle,
                listing.titles.len()
            );

            match continuation(&data) {
                None => {
                    listing.complete = true;
                    return listing;
                }
                Some(next) if token.as_deref() == Some(next) => {
                    log::warn!("Server repeated continuation token {next:?}; stopping listing");
                    return listing;
                }
                Some(next) => token = Some(next.to_string()),
            }

            if !self.page_delay.is_zero() {
                tokio::time::sleep(self.page_delay).await;
            }
        }
    }

    /// Fetch the raw wikitext of `title`.
    pub async fn get_body(&self, title: &str) -> PageContent {
        let params = [
            ("action", "query".to_string()),
            ("prop", "revisions".to_string()),
            ("rvprop", "content".to_string()),
            ("rvslots", "main".to_string()),
            ("format", "json".to_string()),
            ("titles", title.to_string()),
        ];

        match self.fetcher.fetch(&params).await {
            Ok(data) => match revision_body(&data) {
                Some(body) if !body.is_empty() => PageContent::Body(body.to_string()),
                _ => PageContent::Missing,
            },
            Err(failure) => {
                log::warn!("Giving up on {title}: {failure}");
                PageContent::Failed(failure)
            }
        }
    }
}

/// `query.pages.*.title`, in response order.
fn page_titles(data: &Value) -> impl Iterator<Item = String> + '_ {
    data.pointer("/query/pages")
        .and_then(Value::as_object)
        .into_iter()
        .flat_map(|pages| pages.values())
        .filter_map(|page| page.get("title").and_then(Value::as_str))
        .map(str::to_string)
}

/// `continue.gcmcontinue`, if the server has more pages.
fn continuation(data: &Value) -> Option<&str> {
    data.pointer("/continue/gcmcontinue").and_then(Value::as_str)
}

/// `query.pages.*.revisions[0].slots.main.*` of the first page with revisions.
fn revision_body(data: &Value) -> Option<&str> {
    let pages = data.pointer("/query/pages")?.as_object()?;
    let page = pages.values().find(|page| {
        page.get("revisions")
            .and_then(Value::as_array)
            .is_some_and(|revs| !revs.is_empty())
    })?;
    page.pointer("/revisions/0/slots/main/*")?.as_str()
}
