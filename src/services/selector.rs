// src/services/selector.rs

//! Constrained random recipe selection.
//!
//! Draws are uniform over finite title multisets. The random source is a
//! parameter so callers can seed it.

use indexmap::IndexSet;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::error::{AppError, Result};
use crate::models::{Buckets, NormalizedIndex};

/// Optional difficulty and time bucket filters. Empty strings count as unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionQuery {
    pub difficulty: Option<String>,
    pub time: Option<String>,
}

impl SelectionQuery {
    pub fn new(difficulty: Option<&str>, time: Option<&str>) -> Self {
        let clean = |value: Option<&str>| {
            value
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        Self {
            difficulty: clean(difficulty),
            time: clean(time),
        }
    }
}

/// Titles of the bucket `key`, deduplicated in first-seen order.
fn bucket_set<'a>(
    buckets: &'a Buckets,
    key: Option<&str>,
) -> Option<IndexSet<&'a str>> {
    let titles = buckets.get(key?)?;
    Some(titles.iter().map(String::as_str).collect())
}

fn draw<R: Rng + ?Sized>(set: &IndexSet<&str>, rng: &mut R) -> Option<String> {
    if set.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..set.len());
    set.get_index(idx).map(|title| title.to_string())
}

/// Pick one title from `corpus` under `query`.
///
/// Priority:
/// 1. Both filters set: the intersection, else the time bucket, else the
///    difficulty bucket.
/// 2. Only the time filter matches a bucket: that bucket.
/// 3. Only the difficulty filter matches a bucket: that bucket.
/// 4. Otherwise every title across all difficulty buckets, duplicates kept.
///
/// Fails only when step 4 has nothing to draw from.
pub fn select<R: Rng + ?Sized>(
    corpus: &NormalizedIndex,
    query: &SelectionQuery,
    rng: &mut R,
) -> Result<String> {
    let by_difficulty = bucket_set(corpus.difficulty(), query.difficulty.as_deref());
    let by_time = bucket_set(corpus.time(), query.time.as_deref());

    let picked = match (&by_difficulty, &by_time) {
        (Some(difficulty), Some(time)) => {
            let both: IndexSet<&str> = time.intersection(difficulty).copied().collect();
            draw(&both, rng)
                .or_else(|| draw(time, rng))
                .or_else(|| draw(difficulty, rng))
        }
        (None, Some(time)) => draw(time, rng),
        (Some(difficulty), None) => draw(difficulty, rng),
        (None, None) => None,
    };

    if let Some(title) = picked {
        return Ok(title);
    }

    let all: Vec<&String> = corpus.difficulty().values().flatten().collect();
    all.choose(rng)
        .map(|title| title.to_string())
        .ok_or(AppError::EmptyCorpus)
}
