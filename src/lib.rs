// src/lib.rs

//! Wikibooks Cookbook harvester and recipe picker library

pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod storage;
pub mod utils;
