//! Flat delimited export consumed by the price-model training step.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use crate::listing::Listing;

/// Column names in case-insensitive alphabetical order.
pub const HEADER: [&str; 8] = [
    "FuelType",
    "GearType",
    "HorsePower",
    "Make",
    "Model",
    "Price",
    "Range",
    "Year",
];

const SEPARATOR: &str = ", ";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write export to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Writes the header and one row per listing to `writer`.
///
/// Values are joined with `", "` and never quoted; a value that itself
/// contains the separator or a newline corrupts its row.
///
/// # Errors
///
/// Propagates any I/O error from `writer`.
pub fn write_listings<W: Write>(writer: &mut W, listings: &[Listing]) -> std::io::Result<()> {
    writeln!(writer, "{}", HEADER.join(SEPARATOR))?;
    for listing in listings {
        let row = [
            listing.fuel_type.clone(),
            listing.gear_type.clone(),
            listing.horse_power.to_string(),
            listing.make.clone(),
            listing.model.clone(),
            listing.price.to_string(),
            listing.range.to_string(),
            listing.year.clone(),
        ];
        writeln!(writer, "{}", row.join(SEPARATOR))?;
    }
    writer.flush()
}

/// Creates (or truncates) `path` and writes all listings as UTF-8.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be created or written.
pub fn export_listings(path: &Path, listings: &[Listing]) -> Result<(), ExportError> {
    let to_err = |source| ExportError::Io {
        path: path.display().to_string(),
        source,
    };
    let file = File::create(path).map_err(to_err)?;
    let mut writer = BufWriter::new(file);
    write_listings(&mut writer, listings).map_err(to_err)
}
