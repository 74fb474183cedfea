//! Declarative source profiles loaded from `config/sources.yaml`.
//!
//! A profile captures everything that differs between classifieds sites:
//! URL templates, pagination direction, where the make/model vocabulary
//! lives, and the DOM paths leading to each listing field. Selector drift on
//! a site is fixed by editing the YAML, not the adapter.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesFile {
    pub sources: Vec<SourceProfile>,
}

impl SourcesFile {
    /// Profiles with `enabled: true`, in file order.
    pub fn enabled(&self) -> impl Iterator<Item = &SourceProfile> {
        self.sources.iter().filter(|s| s.enabled)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceProfile {
    pub name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Base against which relative listing links are resolved.
    pub base_url: String,
    pub pagination: Pagination,
    pub taxonomy: TaxonomyConfig,
    pub listings: ListingLinks,
    pub detail: DetailPaths,
    pub separators: Separators,
    /// Accept plain digit runs where a thousands-grouped number is expected.
    #[serde(default)]
    pub allow_ungrouped_numbers: bool,
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    /// Listing-page URL template; `{page}` is replaced with the page index.
    pub page_url: String,
    #[serde(default)]
    pub first_page: u32,
    #[serde(default)]
    pub order: PageOrder,
    pub offers_per_page: u32,
    pub offer_count: OfferCount,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageOrder {
    #[default]
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OfferCount {
    /// Known total, maintained by hand.
    Fixed(u32),
    /// Read the total from an indicator element on a results page.
    Discover {
        url: String,
        selector: String,
        separator: String,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaxonomyConfig {
    /// Page carrying the make `<select>`.
    pub url: String,
    /// Selector for the `<option>` elements naming each make; the option's
    /// `value` attribute is the make id.
    pub make_options: String,
    pub strategy: TaxonomyStrategy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxonomyStrategy {
    /// Models come from the embedded per-make table keyed by make id.
    StaticTable,
    /// One request per make id against a models-by-make endpoint.
    PerMakeRequest {
        /// URL template; `{make_id}` is replaced with the option value.
        url: String,
        model_selector: String,
        #[serde(default)]
        label: LabelSource,
    },
}

/// Which element holds a model's display name relative to a matched element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LabelSource {
    #[default]
    #[serde(rename = "self")]
    SelfText,
    NextSibling,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingLinks {
    pub selector: String,
    pub extract: LinkExtraction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LinkExtraction {
    /// Read the link from an attribute, typically `href`.
    Attribute(String),
    /// First regex match over the element's inner HTML.
    Pattern(String),
}

/// DOM paths from a listing detail page to each raw field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailPaths {
    pub title: Vec<PathStep>,
    pub price: Vec<PathStep>,
    pub year: Vec<PathStep>,
    pub fuel_type: Vec<PathStep>,
    pub horse_power: Vec<PathStep>,
    pub gear_type: Vec<PathStep>,
    pub range: Vec<PathStep>,
}

impl DetailPaths {
    fn named(&self) -> [(&'static str, &[PathStep]); 7] {
        [
            ("title", &self.title),
            ("price", &self.price),
            ("year", &self.year),
            ("fuel_type", &self.fuel_type),
            ("horse_power", &self.horse_power),
            ("gear_type", &self.gear_type),
            ("range", &self.range),
        ]
    }
}

/// One step of a DOM path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PathStep {
    /// The `nth` descendant matching `css` (first by default).
    Select {
        css: String,
        #[serde(default)]
        nth: usize,
    },
    /// The nth element child.
    Child(usize),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Separators {
    pub price: String,
    pub range: String,
}

/// Load and validate source profiles from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_sources(path: &Path) -> Result<SourcesFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::SourcesFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_sources(&content)
}

/// Parse and validate source profiles from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the YAML is malformed or fails validation.
pub fn parse_sources(content: &str) -> Result<SourcesFile, ConfigError> {
    let sources_file: SourcesFile = serde_yaml::from_str(content)?;
    validate_sources(&sources_file)?;
    Ok(sources_file)
}

fn validate_sources(sources_file: &SourcesFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for source in &sources_file.sources {
        if source.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "source name must be non-empty".to_string(),
            ));
        }

        if !seen_names.insert(source.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate source name: '{}'",
                source.name
            )));
        }

        if source.pagination.offers_per_page == 0 {
            return Err(ConfigError::Validation(format!(
                "source '{}' has offers_per_page 0",
                source.name
            )));
        }

        if !source.pagination.page_url.contains("{page}") {
            return Err(ConfigError::Validation(format!(
                "source '{}' page_url has no {{page}} placeholder",
                source.name
            )));
        }

        if let TaxonomyStrategy::PerMakeRequest { url, .. } = &source.taxonomy.strategy {
            if !url.contains("{make_id}") {
                return Err(ConfigError::Validation(format!(
                    "source '{}' per-make url has no {{make_id}} placeholder",
                    source.name
                )));
            }
        }

        for (field, path) in source.detail.named() {
            if path.is_empty() {
                return Err(ConfigError::Validation(format!(
                    "source '{}' has an empty path for {field}",
                    source.name
                )));
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "sources_test.rs"]
mod tests;
