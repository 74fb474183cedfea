use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use carprice_core::{export_listings, load_app_config, load_sources};
use carprice_scraper::{run_sources, CrawlSettings, HttpFetcher, SiteAdapter};

#[derive(Debug, Parser)]
#[command(name = "carprice-cli")]
#[command(about = "Harvest used-car listings into a delimited file")]
struct Cli {
    /// Source profiles file [default: CARPRICE_SOURCES_PATH or ./config/sources.yaml]
    #[arg(long)]
    sources: Option<PathBuf>,

    /// Output file, truncated on open [default: CARPRICE_OUTPUT_PATH or ./cars.csv]
    #[arg(long)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_app_config().context("failed to load configuration")?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let sources_path = cli.sources.unwrap_or_else(|| config.sources_path.clone());
    let output_path = cli.output.unwrap_or_else(|| config.output_path.clone());

    let sources_file = load_sources(&sources_path)
        .with_context(|| format!("failed to load sources from {}", sources_path.display()))?;
    let settings = CrawlSettings::from_config(&config);
    let adapters = sources_file
        .enabled()
        .map(|profile| {
            SiteAdapter::new(profile.clone(), settings)
                .with_context(|| format!("invalid profile for source {}", profile.name))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    if adapters.is_empty() {
        tracing::warn!(path = %sources_path.display(), "no enabled sources");
    }

    let fetcher = HttpFetcher::from_config(&config).context("failed to build HTTP client")?;
    let harvest = run_sources(&adapters, &fetcher).await;

    export_listings(&output_path, &harvest.listings)?;

    tracing::info!(
        sources = harvest.reports.len(),
        failed_sources = harvest.failed_sources(),
        listings = harvest.listings.len(),
        output = %output_path.display(),
        "harvest complete"
    );

    Ok(())
}
