//! Listing-link extraction from result pages.

use std::collections::HashSet;

use carprice_core::{LinkExtraction, ListingLinks};
use regex::Regex;
use reqwest::Url;
use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;
use crate::html::selector;

#[derive(Debug, Clone)]
enum Extract {
    Attribute(String),
    Pattern(Regex),
}

#[derive(Debug, Clone)]
pub(crate) struct LinkExtractor {
    selector: Selector,
    extract: Extract,
    base: Url,
}

impl LinkExtractor {
    pub(crate) fn new(config: &ListingLinks, base_url: &str) -> Result<Self, ScraperError> {
        let extract = match &config.extract {
            LinkExtraction::Attribute(name) => Extract::Attribute(name.clone()),
            LinkExtraction::Pattern(pattern) => {
                Extract::Pattern(Regex::new(pattern).map_err(|source| {
                    ScraperError::InvalidPattern {
                        pattern: pattern.clone(),
                        source,
                    }
                })?)
            }
        };
        let base = Url::parse(base_url).map_err(|e| ScraperError::InvalidUrl {
            url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            selector: selector(&config.selector)?,
            extract,
            base,
        })
    }

    /// Absolute listing URLs on a results page, first occurrence order.
    ///
    /// Elements yielding no link, or a link that does not resolve against
    /// the base URL, are skipped.
    pub(crate) fn extract(&self, page: &str) -> Vec<String> {
        let document = Html::parse_document(page);
        let mut seen = HashSet::new();
        document
            .select(&self.selector)
            .filter_map(|element| self.raw_link(element))
            .filter_map(|raw| match self.base.join(&raw) {
                Ok(url) => Some(url.to_string()),
                Err(e) => {
                    tracing::debug!(link = %raw, error = %e, "unresolvable listing link");
                    None
                }
            })
            .filter(|url| seen.insert(url.clone()))
            .collect()
    }

    fn raw_link(&self, element: ElementRef<'_>) -> Option<String> {
        match &self.extract {
            Extract::Attribute(name) => element
                .value()
                .attr(name)
                .map(str::trim)
                .filter(|link| !link.is_empty())
                .map(str::to_owned),
            Extract::Pattern(pattern) => pattern
                .find(&element.inner_html())
                .map(|m| m.as_str().to_owned()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor(selector: &str, extract: LinkExtraction, base: &str) -> LinkExtractor {
        LinkExtractor::new(
            &ListingLinks {
                selector: selector.to_owned(),
                extract,
            },
            base,
        )
        .unwrap()
    }

    #[test]
    fn pattern_over_inner_html() {
        let page = r#"
            <table>
              <tr class="odd"><td><a href="/offer/c101">BMW</a></td></tr>
              <tr class="even"><td onclick="go('offer/c202')">Audi</td></tr>
              <tr class="odd"><td>no link here</td></tr>
            </table>
        "#;
        let links = extractor(
            ".even, .odd",
            LinkExtraction::Pattern("offer/c[0-9]+".to_owned()),
            "https://www.cars.bg/",
        )
        .extract(page);
        assert_eq!(
            links,
            vec![
                "https://www.cars.bg/offer/c101",
                "https://www.cars.bg/offer/c202",
            ]
        );
    }

    #[test]
    fn attribute_links_are_deduplicated_in_order() {
        let page = r#"
            <a class="cmOffersListLink" href="https://www.carmarket.bg/obiava/2">x</a>
            <a class="cmOffersListLink" href="/obiava/1">y</a>
            <a class="cmOffersListLink" href="https://www.carmarket.bg/obiava/2">z</a>
            <a class="cmOffersListLink">no href</a>
        "#;
        let links = extractor(
            ".cmOffersListLink",
            LinkExtraction::Attribute("href".to_owned()),
            "https://www.carmarket.bg/",
        )
        .extract(page);
        assert_eq!(
            links,
            vec![
                "https://www.carmarket.bg/obiava/2",
                "https://www.carmarket.bg/obiava/1",
            ]
        );
    }

    #[test]
    fn invalid_pattern_is_rejected() {
        let err = LinkExtractor::new(
            &ListingLinks {
                selector: "a".to_owned(),
                extract: LinkExtraction::Pattern("offer/(".to_owned()),
            },
            "https://www.cars.bg/",
        )
        .unwrap_err();
        assert!(matches!(err, ScraperError::InvalidPattern { .. }));
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let err = LinkExtractor::new(
            &ListingLinks {
                selector: "a".to_owned(),
                extract: LinkExtraction::Attribute("href".to_owned()),
            },
            "not a url",
        )
        .unwrap_err();
        assert!(matches!(err, ScraperError::InvalidUrl { .. }));
    }
}
