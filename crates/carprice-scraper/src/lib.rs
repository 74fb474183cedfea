pub mod adapter;
pub mod aggregate;
pub mod client;
pub mod error;
pub(crate) mod html;
pub mod isolation;
pub mod normalize;
pub mod pagination;
pub(crate) mod rate_limit;
pub mod resolve;
pub mod taxonomy;

pub use adapter::{CrawlSettings, ListingSource, SiteAdapter, SourceHarvest, SourceStats};
pub use aggregate::{run_sources, Harvest, SourceOutcome, SourceReport};
pub use client::{Fetch, HttpFetcher};
pub use error::ScraperError;
pub use isolation::Boundary;
pub use resolve::{resolve, resolve_make_model};
pub use taxonomy::{ModelTable, Taxonomy};
