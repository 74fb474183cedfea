//! Thin helpers over the `scraper` crate: selector compilation and
//! configured DOM-path traversal.

use std::fmt::Write as _;

use carprice_core::PathStep;
use scraper::{ElementRef, Html, Selector};

use crate::error::ScraperError;

/// Compiles a CSS selector, mapping parse failures to
/// [`ScraperError::InvalidSelector`].
pub(crate) fn selector(css: &str) -> Result<Selector, ScraperError> {
    Selector::parse(css).map_err(|e| ScraperError::InvalidSelector {
        selector: css.to_owned(),
        reason: e.to_string(),
    })
}

/// Concatenated text content of an element, unmodified.
pub(crate) fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

#[derive(Debug, Clone)]
enum Step {
    Select { selector: Selector, nth: usize },
    Child(usize),
}

/// A compiled path from the document root to one element.
#[derive(Debug, Clone)]
pub(crate) struct DomPath {
    steps: Vec<Step>,
    description: String,
}

impl DomPath {
    pub(crate) fn compile(steps: &[PathStep]) -> Result<Self, ScraperError> {
        let mut compiled = Vec::with_capacity(steps.len());
        let mut description = String::new();

        for step in steps {
            if !description.is_empty() {
                description.push_str(" / ");
            }
            match step {
                PathStep::Select { css, nth } => {
                    compiled.push(Step::Select {
                        selector: selector(css)?,
                        nth: *nth,
                    });
                    let _ = write!(description, "select({css})[{nth}]");
                }
                PathStep::Child(index) => {
                    compiled.push(Step::Child(*index));
                    let _ = write!(description, "child({index})");
                }
            }
        }

        Ok(Self {
            steps: compiled,
            description,
        })
    }

    /// Follows the path from the root element.
    pub(crate) fn find<'a>(&self, document: &'a Html) -> Result<ElementRef<'a>, ScraperError> {
        let mut current = document.root_element();
        for step in &self.steps {
            let next = match step {
                Step::Select { selector, nth } => current.select(selector).nth(*nth),
                Step::Child(index) => current.children().filter_map(ElementRef::wrap).nth(*index),
            };
            current = next.ok_or_else(|| ScraperError::MissingElement {
                context: self.description.clone(),
            })?;
        }
        Ok(current)
    }

    /// Text content of the element at the end of the path.
    pub(crate) fn text(&self, document: &Html) -> Result<String, ScraperError> {
        self.find(document).map(element_text)
    }
}
