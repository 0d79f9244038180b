//! Point of interest tables (`name,lat,lon,category`)

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{info, warn};
use serde::Deserialize;

use crate::Error;
use crate::model::PoiCatalog;

#[derive(Debug, Deserialize)]
struct PoiRow {
    name: String,
    lat: f64,
    lon: f64,
    #[serde(default)]
    category: Option<String>,
}

/// Load points of interest from a CSV file with a header row
///
/// # Errors
///
/// Returns an error if the file cannot be opened or has no readable header
pub fn load_pois_csv(path: &Path) -> Result<PoiCatalog, Error> {
    let file = File::open(path).map_err(|e| {
        std::io::Error::new(
            e.kind(),
            format!("Failed to open file '{}': {}", path.display(), e),
        )
    })?;
    let catalog = pois_from_reader(file)?;
    info!(
        "Loaded {} points of interest from {}",
        catalog.len(),
        path.display()
    );
    Ok(catalog)
}

/// Rows that fail to parse are skipped with a warning
///
/// # Errors
///
/// Returns an error if the header cannot be read
pub fn pois_from_reader<R: Read>(reader: R) -> Result<PoiCatalog, Error> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    reader.headers()?;

    let mut catalog = PoiCatalog::new();
    for (line, row) in reader.deserialize::<PoiRow>().enumerate() {
        match row {
            Ok(row) => {
                let category = row.category.filter(|c| !c.is_empty());
                catalog.insert(row.name, row.lat, row.lon, category);
            }
            Err(e) => warn!("Skipping point of interest row {}: {e}", line + 1),
        }
    }
    Ok(catalog)
}
