//! Field extraction from a single listing detail page.

use carprice_core::{DetailPaths, Listing, Separators};
use scraper::Html;

use crate::error::ScraperError;
use crate::html::DomPath;
use crate::normalize::{parse_bounded_integer, parse_thousands, parse_thousands_lenient, parse_year};
use crate::resolve::resolve_make_model;
use crate::taxonomy::Taxonomy;

#[derive(Debug, Clone)]
pub(crate) struct DetailExtractor {
    title: DomPath,
    price: DomPath,
    year: DomPath,
    fuel_type: DomPath,
    horse_power: DomPath,
    gear_type: DomPath,
    range: DomPath,
    separators: Separators,
    allow_ungrouped: bool,
}

impl DetailExtractor {
    pub(crate) fn new(
        paths: &DetailPaths,
        separators: &Separators,
        allow_ungrouped: bool,
    ) -> Result<Self, ScraperError> {
        Ok(Self {
            title: DomPath::compile(&paths.title)?,
            price: DomPath::compile(&paths.price)?,
            year: DomPath::compile(&paths.year)?,
            fuel_type: DomPath::compile(&paths.fuel_type)?,
            horse_power: DomPath::compile(&paths.horse_power)?,
            gear_type: DomPath::compile(&paths.gear_type)?,
            range: DomPath::compile(&paths.range)?,
            separators: separators.clone(),
            allow_ungrouped,
        })
    }

    /// Builds a [`Listing`] from a detail page.
    ///
    /// An unparseable horse-power value becomes `0` rather than an error;
    /// every other missing or malformed field fails the listing.
    pub(crate) fn extract(&self, page: &str, taxonomy: &Taxonomy) -> Result<Listing, ScraperError> {
        let document = Html::parse_document(page);

        // The make is cut from the untrimmed title; surrounding markup
        // whitespace shifts the model search window.
        let title = self.title.text(&document)?;
        let (make, model) =
            resolve_make_model(&title, taxonomy).ok_or_else(|| ScraperError::UnknownMake {
                title: title.trim().to_owned(),
            })?;

        let price = self.grouped(&self.price.text(&document)?, &self.separators.price)?;
        let range = self.grouped(&self.range.text(&document)?, &self.separators.range)?;
        let year = parse_year(&self.year.text(&document)?)?;
        let horse_power = parse_bounded_integer(&self.horse_power.text(&document)?);
        // Outer whitespace would break the unquoted export rows.
        let fuel_type = self.fuel_type.text(&document)?.trim().to_owned();
        let gear_type = self.gear_type.text(&document)?.trim().to_owned();

        Ok(Listing {
            make,
            model,
            fuel_type,
            gear_type,
            horse_power,
            range,
            year,
            price,
        })
    }

    fn grouped(&self, raw: &str, separator: &str) -> Result<u32, ScraperError> {
        if self.allow_ungrouped {
            parse_thousands_lenient(raw, separator)
        } else {
            parse_thousands(raw, separator)
        }
    }
}
