//! Page arithmetic and offer-count discovery for listing result pages.

use carprice_core::{PageOrder, Pagination};
use scraper::Html;

use crate::error::ScraperError;
use crate::html::{element_text, selector};
use crate::normalize::{parse_thousands, parse_thousands_lenient};

/// Number of result pages needed to show `offer_count` offers.
#[must_use]
pub fn page_count(offer_count: u32, offers_per_page: u32) -> u32 {
    if offers_per_page == 0 {
        return 0;
    }
    offer_count.div_ceil(offers_per_page)
}

/// Page indices to visit, in crawl order.
///
/// Ascending runs `first_page .. first_page + pages`; descending visits the
/// same range from the last page back to `first_page`.
#[must_use]
pub fn page_indices(pagination: &Pagination, pages: u32) -> Vec<u32> {
    let start = pagination.first_page;
    let end = start.saturating_add(pages);
    match pagination.order {
        PageOrder::Ascending => (start..end).collect(),
        PageOrder::Descending => (start..end).rev().collect(),
    }
}

#[must_use]
pub fn page_url(template: &str, page: u32) -> String {
    template.replace("{page}", &page.to_string())
}

/// Reads the total offer count from the first element matching `css`.
///
/// # Errors
///
/// Returns [`ScraperError::InvalidSelector`] for a bad selector,
/// [`ScraperError::MissingElement`] when nothing matches, and
/// [`ScraperError::Format`] when the indicator text holds no number.
pub fn parse_offer_count(
    html: &str,
    css: &str,
    separator: &str,
    allow_ungrouped: bool,
) -> Result<u32, ScraperError> {
    let indicator = selector(css)?;
    let document = Html::parse_document(html);
    let text = document
        .select(&indicator)
        .next()
        .map(element_text)
        .ok_or_else(|| ScraperError::MissingElement {
            context: css.to_owned(),
        })?;

    if allow_ungrouped {
        parse_thousands_lenient(&text, separator)
    } else {
        parse_thousands(&text, separator)
    }
}
