// src/services/buckets.rs

//! Bucket normalization.
//!
//! Collapses free-text difficulty and time labels onto a small set of
//! canonical keys. Origin and type labels pass through untouched.

use std::sync::LazyLock;

use regex::Regex;

use crate::models::{Buckets, CategoryIndex, NormalizedIndex, UNKNOWN_DIFFICULTY, VERY_LONG};

/// Upper bounds, in minutes, of the time buckets.
pub const TIME_BUCKETS: [u64; 6] = [15, 30, 60, 90, 120, 180];

/// Difficulty values that do not describe a rating.
const DISCARDED_DIFFICULTIES: [u64; 3] = [7, 8, 30];

static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]+").expect("digit pattern compiles"));

/// Digit runs of `label`, in order. Runs too long for `u64` become `None`.
fn digit_runs(label: &str) -> Vec<Option<u64>> {
    DIGITS
        .find_iter(label)
        .map(|m| m.as_str().parse().ok())
        .collect()
}

/// Smallest bucket that holds `minutes`, or the catch-all.
pub fn time_bucket(minutes: u64) -> String {
    TIME_BUCKETS
        .iter()
        .find(|&&bound| minutes <= bound)
        .map_or_else(|| VERY_LONG.to_string(), u64::to_string)
}

/// Parse a free-text duration such as `"1 hour 30 minutes"` into minutes.
///
/// With "hour" in the label, the first number is hours and a second number,
/// if any, is added as minutes. Otherwise the first number is minutes.
pub fn parse_minutes(label: &str) -> Option<u64> {
    let runs = digit_runs(label);
    let first = (*runs.first()?)?;

    if label.to_lowercase().contains("hour") {
        let extra = match runs.get(1) {
            Some(run) => (*run)?,
            None => 0,
        };
        first.checked_mul(60)?.checked_add(extra)
    } else {
        Some(first)
    }
}

/// Canonical time bucket for a raw label.
pub fn normalize_time(label: &str) -> String {
    parse_minutes(label).map_or_else(|| VERY_LONG.to_string(), time_bucket)
}

/// Canonical difficulty bucket for a raw label.
pub fn normalize_difficulty(label: &str) -> String {
    match digit_runs(label).first() {
        Some(Some(value)) if !DISCARDED_DIFFICULTIES.contains(value) => value.to_string(),
        _ => UNKNOWN_DIFFICULTY.to_string(),
    }
}

/// Re-bucket `raw` with `normalize`, then order the keys.
///
/// Titles are concatenated in raw-label order. Numeric keys come out in
/// ascending numeric order with `catch_all` last.
fn collapse(raw: &Buckets, normalize: impl Fn(&str) -> String, catch_all: &str) -> Buckets {
    let mut collapsed = Buckets::new();
    for (label, titles) in raw {
        collapsed
            .entry(normalize(label))
            .or_default()
            .extend(titles.iter().cloned());
    }
    order_buckets(collapsed, catch_all)
}

/// Numeric keys ascending, then any other keys in their existing order,
/// then `catch_all`.
fn order_buckets(mut buckets: Buckets, catch_all: &str) -> Buckets {
    let rank = |key: &str| match key.parse::<u64>() {
        Ok(value) => (false, value),
        Err(_) => (true, 0),
    };

    let tail = buckets.shift_remove(catch_all);
    buckets.sort_by(|a, _, b, _| rank(a).cmp(&rank(b)));
    if let Some(titles) = tail {
        buckets.insert(catch_all.to_string(), titles);
    }
    buckets
}

/// Normalize the difficulty and time categories of a raw index.
pub fn normalize(raw: &CategoryIndex) -> NormalizedIndex {
    NormalizedIndex::from_normalized(CategoryIndex {
        difficulty: collapse(&raw.difficulty, normalize_difficulty, UNKNOWN_DIFFICULTY),
        time: collapse(&raw.time, normalize_time, VERY_LONG),
        origin: raw.origin.clone(),
        kind: raw.kind.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_time_bucket_boundaries() {
        assert_eq!(time_bucket(0), "15");
        assert_eq!(time_bucket(15), "15");
        assert_eq!(time_bucket(16), "30");
        assert_eq!(time_bucket(45), "60");
        assert_eq!(time_bucket(180), "180");
        assert_eq!(time_bucket(181), VERY_LONG);
    }

    #[test]
    fn test_time_bucket_is_smallest_upper_bound() {
        for minutes in 0..=400 {
            let bucket = time_bucket(minutes);
            match TIME_BUCKETS.iter().find(|&&b| b >= minutes) {
                Some(bound) => {
                    assert_eq!(bucket, bound.to_string());
                    assert!(TIME_BUCKETS.iter().all(|&b| b < minutes || b >= *bound));
                }
                None => assert_eq!(bucket, VERY_LONG),
            }
        }
    }

    #[test]
    fn test_normalize_time_labels() {
        assert_eq!(normalize_time("1 hour 30 minutes"), "90");
        assert_eq!(normalize_time("2 hours"), "120");
        assert_eq!(normalize_time("no time given"), VERY_LONG);
        assert_eq!(normalize_time("45 min"), "60");
        assert_eq!(normalize_time("1 Hour, 45 minutes"), "120");
        assert_eq!(normalize_time("3 hours 1 minute"), VERY_LONG);
        assert_eq!(normalize_time("20-25 minutes"), "30");
        assert_eq!(normalize_time("99999999999999999999 minutes"), VERY_LONG);
    }

    #[test]
    fn test_normalize_difficulty_labels() {
        assert_eq!(normalize_difficulty("7"), UNKNOWN_DIFFICULTY);
        assert_eq!(normalize_difficulty("8"), UNKNOWN_DIFFICULTY);
        assert_eq!(normalize_difficulty("30"), UNKNOWN_DIFFICULTY);
        assert_eq!(normalize_difficulty("thirty"), UNKNOWN_DIFFICULTY);
        assert_eq!(normalize_difficulty("3"), "3");
        assert_eq!(normalize_difficulty("2 (easy)"), "2");
        assert_eq!(normalize_difficulty("03"), "3");
        assert_eq!(normalize_difficulty(UNKNOWN_DIFFICULTY), UNKNOWN_DIFFICULTY);
    }

    #[test]
    fn test_normalize_orders_and_concatenates() {
        let mut raw = CategoryIndex::default();
        raw.push(Category::Difficulty, "unknown", "U");
        raw.push(Category::Difficulty, "3", "C");
        raw.push(Category::Difficulty, "10", "J");
        raw.push(Category::Difficulty, "7", "S");
        raw.push(Category::Difficulty, "1", "A");
        raw.push(Category::Difficulty, "3 ", "C2");

        raw.push(Category::Time, "5 hours", "Slow");
        raw.push(Category::Time, "1 hour", "H");
        raw.push(Category::Time, "20 minutes", "Q");
        raw.push(Category::Time, "60 min", "H2");
        raw.push(Category::Origin, "thailand", "Q");

        let corpus = normalize(&raw);

        let difficulty: Vec<_> = corpus.difficulty().keys().cloned().collect();
        assert_eq!(difficulty, vec!["1", "3", "10", "unknown"]);
        assert_eq!(corpus.difficulty()["3"], vec!["C", "C2"]);
        assert_eq!(corpus.difficulty()["unknown"], vec!["U", "S"]);

        let time: Vec<_> = corpus.time().keys().cloned().collect();
        assert_eq!(time, vec!["30", "60", VERY_LONG]);
        assert_eq!(corpus.time()["60"], vec!["H", "H2"]);

        assert_eq!(corpus.as_index().origin, raw.origin);
    }

    #[test]
    fn test_normalize_without_catch_all() {
        let mut raw = CategoryIndex::default();
        raw.push(Category::Time, "90 minutes", "B");
        raw.push(Category::Time, "10 minutes", "A");

        let corpus = normalize(&raw);
        let time: Vec<_> = corpus.time().keys().cloned().collect();
        assert_eq!(time, vec!["15", "90"]);
        assert!(corpus.difficulty().is_empty());
    }
}
