//! Scrapes the Unity ScriptReference and writes `UnityEngine.xml`.
mod config;

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use docxml_engine::{write_doc_tree, Pipeline, ReqwestFetcher};
use docxml_logging::{scrape_info, scrape_warn, LogDestination, DEFAULT_LOG_FILE};
use log::LevelFilter;

fn main() -> anyhow::Result<()> {
    let loaded = config::load_config(Path::new(config::CONFIG_FILENAME));
    let config = loaded.as_ref().cloned().unwrap_or_default();

    let destination = if config.log_to_file {
        LogDestination::Both(DEFAULT_LOG_FILE.into())
    } else {
        LogDestination::Terminal
    };
    docxml_logging::initialize(destination, LevelFilter::Info);
    if let Err(err) = &loaded {
        scrape_warn!("{}; using defaults", err);
    }

    let fetcher =
        ReqwestFetcher::new(config.fetch_settings()).context("failed to build http client")?;
    let pipeline = Pipeline::new(Arc::new(fetcher), config.scrape_settings());

    let tree = pipeline.run_blocking().context("scrape failed")?;
    let counts = tree.kind_counts();
    scrape_info!(
        "Collected {} members ({} types, {} constructors, {} properties, {} methods, {} unknown)",
        tree.len(),
        counts.types,
        counts.constructors,
        counts.properties,
        counts.methods,
        counts.unknown
    );

    let written = write_doc_tree(&tree, &config.output_path)
        .with_context(|| format!("failed to write {}", config.output_path.display()))?;
    scrape_info!("Wrote {}", written.display());
    Ok(())
}
