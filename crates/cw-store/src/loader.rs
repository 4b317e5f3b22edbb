//! CSV site loader.
//!
//! # CSV format
//!
//! One row per site, in creation order.
//!
//! ```csv
//! name,location,lat,lon,capacity,occupancy,parking_capacity,parking_available,zones
//! Somnath Temple,"Somnath, Gujarat",20.8880,70.4017,6000,4200,500,245,main_temple:85;queue_area:78
//! Pavagadh Temple,"Pavagadh, Gujarat",,,3000,1950,200,67,
//! ```
//!
//! `lat`/`lon` may both be empty (the site is left out of nearest-site
//! queries).  `occupancy` and `parking_available` may be empty and then take
//! the builder defaults.  `zones` is a `;`-separated list of `name:density`
//! pairs and may be empty.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use cw_core::GeoPoint;

use crate::{SiteSpec, StoreError, StoreResult};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct SiteRecord {
    name:              String,
    #[serde(default)]
    location:          String,
    lat:               Option<f32>,
    lon:               Option<f32>,
    capacity:          u32,
    occupancy:         Option<u32>,
    parking_capacity:  u32,
    parking_available: Option<u32>,
    #[serde(default)]
    zones:             String,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load site specs from a CSV file.
pub fn load_sites_csv(path: &Path) -> StoreResult<Vec<SiteSpec>> {
    let file = std::fs::File::open(path).map_err(StoreError::Io)?;
    load_sites_reader(file)
}

/// Like [`load_sites_csv`] but accepts any `Read` source.
pub fn load_sites_reader<R: Read>(reader: R) -> StoreResult<Vec<SiteSpec>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut specs = Vec::new();

    for (row, result) in csv_reader.deserialize::<SiteRecord>().enumerate() {
        let rec = result.map_err(|e| StoreError::Parse(e.to_string()))?;

        let position = match (rec.lat, rec.lon) {
            (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
            (None, None) => None,
            _ => {
                return Err(StoreError::Parse(format!(
                    "row {}: site {:?} has only one of lat/lon",
                    row + 1,
                    rec.name
                )));
            }
        };

        let mut spec = SiteSpec::new(rec.name, rec.capacity, rec.parking_capacity)
            .location(rec.location);
        spec.position = position;
        spec.occupancy = rec.occupancy;
        spec.parking_available = rec.parking_available;
        spec.zones = parse_zones(&rec.zones)?;

        specs.push(spec);
    }

    Ok(specs)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn parse_zones(s: &str) -> StoreResult<Vec<(String, u8)>> {
    s.split(';')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            let (name, density) = part.split_once(':').ok_or_else(|| {
                StoreError::Parse(format!("invalid zone {part:?}: expected \"name:density\""))
            })?;
            let density = density.trim().parse::<u8>().map_err(|_| {
                StoreError::Parse(format!(
                    "invalid zone density {density:?} for {name:?}: expected 0-255"
                ))
            })?;
            Ok((name.trim().to_owned(), density))
        })
        .collect()
}
