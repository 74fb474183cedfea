//! Offline make-id → models table for sites whose model lists are not
//! served per make.
//!
//! The table is a versioned JSON asset in `data/`, embedded at compile time.
//! It must be updated by hand when the site adds makes.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::ScraperError;

use super::{MakeOption, Taxonomy};

const EMBEDDED: &str = include_str!("../../data/carmarket_models.json");

#[derive(Debug, Clone, Deserialize)]
pub struct ModelTable {
    pub source: String,
    pub version: u32,
    models: HashMap<String, Vec<String>>,
}

impl ModelTable {
    /// Loads the table shipped with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::ModelTable`] if the embedded JSON is malformed.
    pub fn embedded() -> Result<Self, ScraperError> {
        Self::from_json(EMBEDDED)
    }

    /// # Errors
    ///
    /// Returns [`ScraperError::ModelTable`] if `json` does not match the table shape.
    pub fn from_json(json: &str) -> Result<Self, ScraperError> {
        serde_json::from_str(json).map_err(ScraperError::ModelTable)
    }

    /// Models for a make id; empty when the id is not in the table.
    #[must_use]
    pub fn models_for(&self, make_id: &str) -> &[String] {
        self.models.get(make_id).map(Vec::as_slice).unwrap_or_default()
    }

    #[must_use]
    pub fn make_count(&self) -> usize {
        self.models.len()
    }
}

pub(super) fn build(options: &[MakeOption], table: &ModelTable) -> Taxonomy {
    let mut taxonomy = Taxonomy::new();
    for option in options {
        let models = table.models_for(&option.id);
        if models.is_empty() {
            tracing::debug!(
                make = %option.name,
                make_id = %option.id,
                table_version = table.version,
                "make id not in static model table"
            );
        }
        taxonomy.add_models(&option.name, models.iter().cloned());
    }
    taxonomy
}
