//! The canonical source adapter.
//!
//! Every site is crawled by the same state machine; what differs between
//! sites lives in its [`SourceProfile`]:
//!
//! 1. build the site's [`Taxonomy`]
//! 2. determine the offer count (fixed or read from an indicator element)
//! 3. walk the result pages in the profile's order until the pages run out
//!    or a page comes back empty
//! 4. fetch each linked detail page and extract a [`Listing`]
//!
//! Listing and page failures are contained and counted in [`SourceStats`];
//! failures in steps 1 and 2 abort the source.

mod detail;
mod links;

use std::future::Future;
use std::time::Duration;

use carprice_core::{AppConfig, Listing, OfferCount, SourceProfile};

use crate::client::Fetch;
use crate::error::ScraperError;
use crate::isolation::{contain, Boundary};
use crate::pagination::{page_count, page_indices, page_url, parse_offer_count};
use crate::taxonomy::{build_taxonomy, Taxonomy};

use detail::DetailExtractor;
use links::LinkExtractor;

/// A site that can be crawled for listings.
///
/// The fetcher is always supplied by the caller.
pub trait ListingSource {
    fn name(&self) -> &str;

    /// Crawls the whole source.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] when the source cannot be crawled at all,
    /// e.g. its taxonomy page or offer-count indicator is unreachable.
    fn gather<F: Fetch>(
        &self,
        fetcher: &F,
    ) -> impl Future<Output = Result<SourceHarvest, ScraperError>>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CrawlSettings {
    /// Pause before each page or listing fetch within a source.
    pub inter_request_delay: Duration,
}

impl CrawlSettings {
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            inter_request_delay: Duration::from_millis(config.scraper_inter_request_delay_ms),
        }
    }
}

/// Counters for one source run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceStats {
    pub pages_visited: u32,
    pub pages_failed: u32,
    pub listings_seen: u32,
    pub listings_failed: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceHarvest {
    pub listings: Vec<Listing>,
    pub stats: SourceStats,
}

/// A [`ListingSource`] driven by a [`SourceProfile`].
#[derive(Debug, Clone)]
pub struct SiteAdapter {
    profile: SourceProfile,
    settings: CrawlSettings,
    links: LinkExtractor,
    detail: DetailExtractor,
}

impl SiteAdapter {
    /// Compiles the profile's selectors, link pattern and base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`], [`ScraperError::InvalidPattern`]
    /// or [`ScraperError::InvalidUrl`] when the profile does not compile.
    pub fn new(profile: SourceProfile, settings: CrawlSettings) -> Result<Self, ScraperError> {
        let links = LinkExtractor::new(&profile.listings, &profile.base_url)?;
        let detail = DetailExtractor::new(
            &profile.detail,
            &profile.separators,
            profile.allow_ungrouped_numbers,
        )?;
        Ok(Self {
            profile,
            settings,
            links,
            detail,
        })
    }

    async fn offer_count<F: Fetch>(&self, fetcher: &F) -> Result<u32, ScraperError> {
        match &self.profile.pagination.offer_count {
            OfferCount::Fixed(count) => Ok(*count),
            OfferCount::Discover {
                url,
                selector,
                separator,
            } => {
                let page = fetcher.fetch_text(url).await?;
                parse_offer_count(
                    &page,
                    selector,
                    separator,
                    self.profile.allow_ungrouped_numbers,
                )
            }
        }
    }

    async fn crawl_listing<F: Fetch>(
        &self,
        fetcher: &F,
        url: &str,
        taxonomy: &Taxonomy,
    ) -> Result<Listing, ScraperError> {
        let page = fetcher.fetch_text(url).await?;
        self.detail.extract(&page, taxonomy)
    }

    async fn pause(&self) {
        if !self.settings.inter_request_delay.is_zero() {
            tokio::time::sleep(self.settings.inter_request_delay).await;
        }
    }
}

impl ListingSource for SiteAdapter {
    fn name(&self) -> &str {
        &self.profile.name
    }

    async fn gather<F: Fetch>(&self, fetcher: &F) -> Result<SourceHarvest, ScraperError> {
        let source = self.profile.name.as_str();

        let taxonomy = build_taxonomy(fetcher, &self.profile.taxonomy).await?;
        tracing::info!(
            source,
            makes = taxonomy.len(),
            models = taxonomy.model_count(),
            "taxonomy built"
        );

        let pagination = &self.profile.pagination;
        let offers = self.offer_count(fetcher).await?;
        let pages = page_count(offers, pagination.offers_per_page);
        tracing::info!(source, offers, pages, "starting page loop");

        let mut harvest = SourceHarvest::default();
        for page in page_indices(pagination, pages) {
            let url = page_url(&pagination.page_url, page);
            self.pause().await;

            let Some(body) = contain(Boundary::Page, &url, fetcher.fetch_text(&url)).await else {
                harvest.stats.pages_failed += 1;
                continue;
            };
            if body.trim().is_empty() {
                tracing::info!(source, page, "empty results page, stopping");
                break;
            }
            harvest.stats.pages_visited += 1;

            let links = self.links.extract(&body);
            tracing::debug!(source, page, links = links.len(), "extracted listing links");

            for link in links {
                self.pause().await;
                tracing::info!(source, url = %link, "crawling listing");
                harvest.stats.listings_seen += 1;

                let crawled =
                    contain(Boundary::Listing, &link, self.crawl_listing(fetcher, &link, &taxonomy))
                        .await;
                match crawled {
                    Some(listing) => harvest.listings.push(listing),
                    None => harvest.stats.listings_failed += 1,
                }
            }
        }

        tracing::info!(
            source,
            listings = harvest.listings.len(),
            pages_visited = harvest.stats.pages_visited,
            pages_failed = harvest.stats.pages_failed,
            listings_failed = harvest.stats.listings_failed,
            "source finished"
        );
        Ok(harvest)
    }
}
