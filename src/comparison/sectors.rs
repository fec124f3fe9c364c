use crate::telemetry::{DistancedPoint, distance::total_distance};

pub const DEFAULT_SECTOR_COUNT: usize = 3;

/// One equal-width distance segment of a lap, used for boundary annotations
/// on the overlay chart. Sectors are contiguous: each sector's end is the
/// next sector's start.
#[derive(Clone, Debug, PartialEq)]
pub struct Sector {
    pub index: usize,
    pub start_distance: f64,
    pub end_distance: f64,
    pub label: String,
}

/// Splits a lap's total distance into `sector_count` equal-width contiguous
/// sectors labeled "Sector 1".."Sector N".
///
/// A zero-length lap collapses every sector to zero width, which is still a
/// valid partition for annotation purposes. `sector_count == 0` yields no
/// sectors.
pub fn partition(samples: &[DistancedPoint], sector_count: usize) -> Vec<Sector> {
    if sector_count == 0 {
        return Vec::new();
    }
    let max_distance = total_distance(samples);
    let sector_len = max_distance / sector_count as f64;
    (0..sector_count)
        .map(|i| Sector {
            index: i,
            start_distance: i as f64 * sector_len,
            end_distance: (i + 1) as f64 * sector_len,
            label: format!("Sector {}", i + 1),
        })
        .collect()
}
