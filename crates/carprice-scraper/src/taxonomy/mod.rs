//! Per-source make → model vocabulary.
//!
//! A [`Taxonomy`] is built at the start of each source run from that
//! source's own search form and discarded when the run ends. Spellings
//! differ between sites, so an index is never reused across sources.

mod per_make;
mod static_table;

use std::collections::{BTreeMap, BTreeSet};

use carprice_core::{TaxonomyConfig, TaxonomyStrategy};
use scraper::Html;

use crate::client::Fetch;
use crate::error::ScraperError;
use crate::html::{element_text, selector};

pub use static_table::ModelTable;

/// Make names mapped to the unique model names known for each.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Taxonomy {
    makes: BTreeMap<String, BTreeSet<String>>,
}

impl Taxonomy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`Taxonomy::add_models`].
    #[must_use]
    pub fn with_models<I, S>(mut self, make: &str, models: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_models(make, models);
        self
    }

    /// Registers `make` (if new) and merges `models` into its set.
    pub fn add_models<I, S>(&mut self, make: &str, models: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.makes
            .entry(make.to_owned())
            .or_default()
            .extend(models.into_iter().map(Into::into));
    }

    #[must_use]
    pub fn contains_make(&self, make: &str) -> bool {
        self.makes.contains_key(make)
    }

    #[must_use]
    pub fn models(&self, make: &str) -> Option<&BTreeSet<String>> {
        self.makes.get(make)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.makes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.makes.is_empty()
    }

    /// Total number of models across all makes.
    #[must_use]
    pub fn model_count(&self) -> usize {
        self.makes.values().map(BTreeSet::len).sum()
    }
}

/// One `<option>` of a make selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MakeOption {
    pub id: String,
    pub name: String,
}

/// Builds the taxonomy for one source according to its configured strategy.
///
/// # Errors
///
/// Returns [`ScraperError`] if the search page or any models request fails,
/// a configured selector is invalid, or the embedded model table is
/// malformed.
pub async fn build_taxonomy<F: Fetch>(
    fetcher: &F,
    config: &TaxonomyConfig,
) -> Result<Taxonomy, ScraperError> {
    let page = fetcher.fetch_text(&config.url).await?;
    let options = parse_make_options(&page, &config.make_options)?;
    tracing::debug!(url = %config.url, makes = options.len(), "parsed make selector");

    match &config.strategy {
        TaxonomyStrategy::StaticTable => {
            let table = ModelTable::embedded()?;
            Ok(static_table::build(&options, &table))
        }
        TaxonomyStrategy::PerMakeRequest {
            url,
            model_selector,
            label,
        } => per_make::build(fetcher, &options, url, model_selector, *label).await,
    }
}

/// Reads make names and ids from the elements matching `option_css`.
///
/// Options without a `value` attribute or with a blank label are skipped.
pub(crate) fn parse_make_options(
    html: &str,
    option_css: &str,
) -> Result<Vec<MakeOption>, ScraperError> {
    let option_selector = selector(option_css)?;
    let document = Html::parse_document(html);

    let options = document
        .select(&option_selector)
        .filter_map(|option| {
            let id = option.value().attr("value")?.trim().to_owned();
            let name = element_text(option).trim().to_owned();
            if id.is_empty() || name.is_empty() {
                return None;
            }
            Some(MakeOption { id, name })
        })
        .collect();

    Ok(options)
}
