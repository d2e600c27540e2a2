//! Service layer for the cookbook application.
//!
//! This module contains the business logic for:
//! - Category listing and page fetching (`WikiClient`)
//! - Template metadata extraction (`MetadataExtractor`)
//! - Corpus harvesting (`CorpusBuilder`)
//! - Bucket normalization (`buckets`)
//! - Random recipe selection (`selector`)
//! - Markup stripping (`markup`)

pub mod buckets;
mod corpus;
pub mod markup;
mod metadata;
pub mod selector;
mod wiki;

pub use corpus::CorpusBuilder;
pub use markup::clean_markup;
pub use metadata::{FIELD_TABLE, MetadataExtractor, RawMetadata};
pub use selector::{SelectionQuery, select};
pub use wiki::WikiClient;
