//! Cookbook CLI
//!
//! Harvest the Wikibooks recipe category, normalize it, and pick recipes.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use cookbook::{
    error::Result,
    models::Config,
    pipeline::{self, Oracle},
    services::WikiClient,
    storage::LocalStorage,
    utils::http::{HttpFetcher, HttpTransport, RetryPolicy},
};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Cookbook - random recipes from Wikibooks
#[derive(Parser, Debug)]
#[command(name = "cookbook", version, about = "Wikibooks Cookbook recipe picker")]
struct Cli {
    /// Path to storage directory containing config and corpus files
    #[arg(short, long, default_value = "storage")]
    storage_dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the category and index every recipe page
    Harvest {
        /// Category to harvest (default from config)
        #[arg(long)]
        category: Option<String>,

        /// Only re-fetch titles that failed in the last run
        #[arg(long)]
        retry_failed: bool,
    },

    /// Collapse difficulty and time labels into buckets
    Normalize,

    /// Pick a random recipe and print it
    Pick {
        /// Difficulty bucket, e.g. "2"
        #[arg(short, long)]
        difficulty: Option<String>,

        /// Time bucket, e.g. "30" or "Very long"
        #[arg(short, long)]
        time: Option<String>,

        /// Seed for a reproducible pick
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Show the available difficulty and time buckets
    Buckets,

    /// Validate configuration file
    Validate,
}

/// Initialize logging based on verbosity flag and configured level.
fn init_logging(verbose: bool, configured: &str) {
    let level = if verbose { "debug" } else { configured };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

fn wiki_client(config: &Config) -> Result<WikiClient<HttpTransport>> {
    let transport = HttpTransport::new(&config.wiki, &config.http)?;
    let fetcher = HttpFetcher::new(transport, RetryPolicy::from(&config.http));
    Ok(WikiClient::new(fetcher, config.harvest.page_delay()))
}

/// Main entry point for the CLI application.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.storage_dir.join("config.toml");
    let loaded = Config::load(&config_path);
    let level = loaded
        .as_ref()
        .map(|c| c.logging.level.clone())
        .unwrap_or_else(|_| "info".to_string());
    init_logging(cli.verbose, &level);

    let config = loaded.unwrap_or_else(|e| {
        log::warn!(
            "Config load failed from {}: {}. Using defaults.",
            config_path.display(),
            e
        );
        Config::default()
    });
    let storage = LocalStorage::new(&cli.storage_dir);

    match cli.command {
        Command::Harvest {
            category,
            retry_failed,
        } => {
            config.validate()?;
            let client = wiki_client(&config)?;

            let report = if retry_failed {
                pipeline::run_retry_failed(&config, &client, &storage).await?
            } else {
                let category = category.unwrap_or_else(|| config.wiki.category.clone());
                pipeline::run_harvest(&config, &client, &storage, &category).await?
            };

            if !report.failed.is_empty() {
                log::info!(
                    "{} titles failed; rerun with --retry-failed to fetch them again",
                    report.failed.len()
                );
            }
        }

        Command::Normalize => {
            pipeline::run_normalize(&config, &storage).await?;
        }

        Command::Pick {
            difficulty,
            time,
            seed,
        } => {
            let corpus = pipeline::load_corpus(&storage, &config.paths.corpus).await?;
            let oracle = Oracle::new(wiki_client(&config)?, corpus, &config);

            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let title = oracle.select(difficulty.as_deref(), time.as_deref(), &mut rng)?;
            log::debug!("Picked {title}");

            println!("{}", oracle.card(&title).await);
        }

        Command::Buckets => {
            let corpus = pipeline::load_corpus(&storage, &config.paths.corpus).await?;

            println!("Difficulty:");
            for (key, titles) in corpus.difficulty() {
                println!("    {key}: {}", titles.len());
            }
            println!("Time:");
            for (key, titles) in corpus.time() {
                println!("    {key}: {}", titles.len());
            }
        }

        Command::Validate => {
            log::info!("Validating configuration...");

            if let Err(e) = config.validate() {
                log::error!("Config validation failed: {}", e);
                return Err(e);
            }
            log::info!("✓ Config OK");
        }
    }

    Ok(())
}
